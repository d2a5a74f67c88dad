//! # Search Session
//!
//! [`SearchSession`] owns the state of one tab from startup to close. Every
//! change goes through it, and every change **settles** the same way:
//!
//! 1. The active mode's state is re-encoded into the URL.
//! 2. The active mode's snapshot is written to the session store.
//!
//! Both steps are idempotent and independent. A snapshot write that fails is
//! logged and otherwise ignored; the in-memory state and the URL are still
//! updated.
//!
//! ## Reset
//!
//! [`SearchSession::reset`] drops the active mode's snapshot and returns that
//! mode to its hard defaults (preferences over schema defaults). The other
//! mode is untouched.

use crate::codec::{encode_query, QueryParams};
use crate::error::{FacetError, Result};
use crate::model::{AppSearchState, Mode, ParamValue, SearchState};
use crate::schema::{ParameterConfig, Schema};
use crate::startup::{hard_defaults_from_store, resolve, Browser};
use crate::store::snapshot::{clear_snapshot, save_snapshot};
use crate::store::{KeyValueStore, StorageKeys};
use crate::url_state::state_to_params_over;

pub struct SearchSession<S> {
    state: AppSearchState,
    browser: Option<Browser<S>>,
    keys: StorageKeys,
}

impl<S: KeyValueStore> SearchSession<S> {
    /// Resolve the initial state and take ownership of the browser context.
    pub fn start(browser: Option<Browser<S>>, keys: StorageKeys) -> Self {
        let state = resolve(browser.as_ref(), &keys);
        let mut session = Self {
            state,
            browser,
            keys,
        };
        session.sync_location();
        session
    }

    pub fn state(&self) -> &AppSearchState {
        &self.state
    }

    pub fn into_state(self) -> AppSearchState {
        self.state
    }

    pub fn active_mode(&self) -> Mode {
        self.state.active_mode
    }

    pub fn browser(&self) -> Option<&Browser<S>> {
        self.browser.as_ref()
    }

    /// The URL query for the active mode.
    pub fn url(&self) -> String {
        let mode = self.state.active_mode;
        let baseline = self.hard_defaults(mode);
        state_to_params_over(&Schema::builtin(), self.state.current(), mode, &baseline).to_string()
    }

    /// Set a parameter of the active mode. Returns the new URL query.
    ///
    /// Fails without touching anything when the parameter is unknown, does
    /// not apply to the active mode, or `value` does not fit its shape.
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<String> {
        let config = self.parameter(name)?;
        encode_query(&config.kind, &value, &mut QueryParams::new())?;

        let baseline = self.hard_defaults(self.state.active_mode);
        let present = self.state.current_mut().assign_over(config, value, &baseline);
        tracing::debug!(name, present, mode = %self.state.active_mode, "parameter set");
        Ok(self.settle())
    }

    /// Return a parameter of the active mode to its hard default.
    pub fn clear(&mut self, name: &str) -> Result<String> {
        let config = self.parameter(name)?;
        let baseline = self.hard_defaults(self.state.active_mode);
        let state = self.state.current_mut();
        match baseline.get(config.name) {
            Some(value) => state.insert(config.name, value.clone()),
            None => state.remove(config.name),
        };
        Ok(self.settle())
    }

    pub fn set_active_mode(&mut self, mode: Mode) -> String {
        self.state.active_mode = mode;
        self.settle()
    }

    /// Drop the active mode's snapshot and return it to its hard defaults.
    pub fn reset(&mut self) -> String {
        let mode = self.state.active_mode;
        if let Some(browser) = &self.browser {
            if let Err(err) = clear_snapshot(&browser.session, &self.keys, mode) {
                tracing::warn!(%err, %mode, "failed to clear snapshot");
            }
        }
        let defaults = self.hard_defaults(mode);
        *self.state.for_mode_mut(mode) = defaults;
        self.sync_location()
    }

    /// Preferences over schema defaults, read fresh from the preference
    /// store.
    fn hard_defaults(&self, mode: Mode) -> SearchState {
        match &self.browser {
            Some(browser) => hard_defaults_from_store(&browser.preferences, &self.keys, mode),
            None => SearchState::new(),
        }
    }

    fn parameter(&self, name: &str) -> Result<&'static ParameterConfig> {
        let mode = self.state.active_mode;
        let config = Schema::builtin()
            .get(name)
            .ok_or_else(|| FacetError::UnknownParameter(name.to_string()))?;
        if !config.scope.includes(mode) {
            return Err(FacetError::ModeMismatch {
                name: name.to_string(),
                mode,
            });
        }
        Ok(config)
    }

    fn settle(&mut self) -> String {
        if let Some(browser) = &self.browser {
            let mode = self.state.active_mode;
            if let Err(err) = save_snapshot(&browser.session, &self.keys, mode, self.state.current()) {
                tracing::warn!(%err, %mode, "failed to save snapshot");
            }
        }
        self.sync_location()
    }

    fn sync_location(&mut self) -> String {
        let url = self.url();
        if let Some(browser) = &mut self.browser {
            browser.location = format!("?{url}");
        }
        url
    }
}
