//! Storefront runtime.
//!
//! [`Storefront`] owns the [`AppState`], the persistence layer and the RNG.
//! Hosts feed it [`UiEvent`]s (or raw [`Action`]s), carry out the returned
//! [`Outcome`], and re-render the root container from [`Storefront::render`].
//!
//! ```text
//! host event ─► UiEvent ─► Action ─► AppState::apply ─► [Effect]
//!                                                           │
//!                 storage writes ◄── PersistCart/PersistTheme
//!                 Outcome        ◄── Navigate/Notify/ScrollTo
//! ```

use std::collections::VecDeque;

use rand::SeedableRng;
use rand::rngs::StdRng;
use toyverse_core::ProductId;
use tracing::instrument;

use crate::cart::{Cart, CartEntry};
use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::events::UiEvent;
use crate::router::Route;
use crate::state::{Action, AppState, Effect};
use crate::storage::{KeyValueStorage, Persistence};
use crate::theme::Theme;
use crate::views::Page;

/// Notices kept for the next render. Older ones are dropped first.
pub const MAX_PENDING_NOTICES: usize = 8;

/// Host-provided startup inputs.
#[derive(Debug, Clone, Default)]
pub struct StartOptions {
    /// Location fragment at load time, e.g. `"#/cart"`.
    pub initial_fragment: Option<String>,
    /// Host `prefers-color-scheme: dark`.
    pub prefers_dark: bool,
    /// Fixed RNG seed. Seeded from the OS when `None`.
    pub rng_seed: Option<u64>,
}

/// What the host must do after a dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// New location fragment to set.
    pub navigate_to: Option<String>,
    /// Product card to scroll into view.
    pub scroll_to: Option<ProductId>,
    /// Notices raised by this dispatch. They are also queued for the next
    /// [`Storefront::render`], keeping at most [`MAX_PENDING_NOTICES`].
    pub notices: Vec<String>,
}

/// A running storefront bound to a storage backend.
#[derive(Debug)]
pub struct Storefront<S> {
    state: AppState,
    persistence: Persistence<S>,
    rng: StdRng,
    pending_notices: VecDeque<String>,
}

impl<S: KeyValueStorage> Storefront<S> {
    /// Start a storefront.
    ///
    /// Resolves and persists the theme, rehydrates the cart, and routes to
    /// the initial fragment. An empty fragment goes to the home route and
    /// asks the host to set `#/home`.
    #[instrument(skip_all, fields(fragment = ?options.initial_fragment))]
    pub fn start(
        config: &StorefrontConfig,
        catalog: Catalog,
        storage: S,
        options: StartOptions,
    ) -> (Self, Outcome) {
        let mut persistence = Persistence::new(storage, config.storage_keys());
        let keys = persistence.keys().clone();

        let stored_theme = persistence.load_raw(&keys.theme);
        let theme = Theme::resolve(stored_theme.as_deref(), options.prefers_dark);
        persistence.save_raw(&keys.theme, theme.as_str());

        let cart = persistence
            .load_json::<Vec<CartEntry>>(&keys.cart)
            .map(Cart::from_record)
            .unwrap_or_default();
        tracing::debug!(
            theme = %theme,
            cart_lines = cart.len(),
            products = catalog.len(),
            "Storefront starting"
        );

        let state = AppState::new(catalog, config.pagination())
            .with_cart(cart)
            .with_theme(theme);
        let rng = options
            .rng_seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

        let mut storefront = Self {
            state,
            persistence,
            rng,
            pending_notices: VecDeque::new(),
        };

        let fragment = options.initial_fragment.unwrap_or_default();
        let outcome = if fragment.trim_start_matches('#').is_empty() {
            Outcome {
                navigate_to: Some(Route::Home.to_fragment()),
                ..Outcome::default()
            }
        } else {
            storefront.dispatch(Action::Navigate(Route::parse(&fragment)))
        };
        (storefront, outcome)
    }

    /// Start from environment configuration.
    ///
    /// # Errors
    ///
    /// Returns `AppError` if the configuration is invalid or the configured
    /// catalog cannot be loaded.
    pub fn from_env(storage: S, options: StartOptions) -> Result<(Self, Outcome)> {
        let config = StorefrontConfig::from_env()?;
        let catalog = config.load_catalog()?;
        Ok(Self::start(&config, catalog, storage, options))
    }

    /// Apply an action and carry out its effects.
    #[instrument(skip(self))]
    pub fn dispatch(&mut self, action: Action) -> Outcome {
        let effects = self.state.apply(action, &mut self.rng);
        if effects.is_empty() {
            tracing::debug!(route = self.state.route().name(), "Action had no effects");
        }

        let mut outcome = Outcome::default();
        for effect in effects {
            match effect {
                Effect::PersistCart => self.persist_cart(),
                Effect::PersistTheme => self.persist_theme(),
                Effect::Navigate(route) => outcome.navigate_to = Some(route.to_fragment()),
                Effect::Notify(notice) => {
                    self.queue_notice(notice.clone());
                    outcome.notices.push(notice);
                }
                Effect::ScrollTo(id) => outcome.scroll_to = Some(id),
            }
        }
        outcome
    }

    /// Translate and dispatch a host event. Meaningless events are ignored.
    pub fn handle(&mut self, event: UiEvent) -> Outcome {
        match event.into_action() {
            Some(action) => self.dispatch(action),
            None => {
                tracing::debug!("Ignoring UI event without an action");
                Outcome::default()
            }
        }
    }

    /// Build the page for the current state, draining queued notices.
    pub fn render(&mut self) -> Page {
        Page::build(&self.state, self.pending_notices.drain(..).collect())
    }

    /// Render the current page to HTML.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Render` if a template fails.
    pub fn render_html(&mut self) -> Result<String> {
        Ok(self.render().render()?)
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        self.persistence.storage()
    }

    /// Stop the storefront and hand back its storage.
    pub fn into_storage(self) -> S {
        self.persistence.into_storage()
    }

    fn queue_notice(&mut self, notice: String) {
        if self.pending_notices.len() >= MAX_PENDING_NOTICES {
            self.pending_notices.pop_front();
        }
        self.pending_notices.push_back(notice);
    }

    fn persist_cart(&mut self) {
        let key = self.persistence.keys().cart.clone();
        let record = self.state.cart().to_record();
        self.persistence.save_json(&key, &record);
    }

    fn persist_theme(&mut self) {
        let key = self.persistence.keys().theme.clone();
        self.persistence.save_raw(&key, self.state.theme().as_str());
    }
}
