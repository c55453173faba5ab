//! Shell state container
//!
//! Applies user actions to the caller's session and hands back the view the
//! page renders. Every action is one transition under the session lock.

use chrono::Utc;

use phoneframe_frame::FrameSignal;
use phoneframe_session::{Session, SessionManager};

use crate::config::Config;
use crate::error::CoreError;
use crate::view::{FrameVerdict, ShellView};
use crate::Result;

pub struct Shell {
    /// Configuration
    config: Config,
    /// Live per-user sessions
    session_manager: SessionManager,
}

impl Shell {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let session_manager = SessionManager::new(config.session_settings()?);

        tracing::info!(
            home = %config.home,
            presets = config.device_presets.len(),
            quick_links = config.quick_links.len(),
            "Shell initialized"
        );

        Ok(Self {
            config,
            session_manager,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session_manager(&self) -> &SessionManager {
        &self.session_manager
    }

    // === Session operations ===

    /// Resume the caller's session, or start one. Returns the session id and
    /// whether it was created by this call.
    pub fn open_session(&self, session_id: Option<&str>) -> (String, bool) {
        let (session, created) = self.session_manager.resume_or_create(session_id);
        (session.id, created)
    }

    pub fn view(&self, session_id: &str) -> Result<ShellView> {
        let session = self.session_manager.get_session(session_id)?;
        Ok(self.build_view(&session))
    }

    pub fn end_session(&self, session_id: &str) -> Result<()> {
        Ok(self.session_manager.end_session(session_id)?)
    }

    pub fn reap_idle_sessions(&self) -> usize {
        self.session_manager.reap_idle(Utc::now())
    }

    // === Navigation operations ===

    pub fn navigate(&self, session_id: &str, input: &str) -> Result<ShellView> {
        self.apply(session_id, |session| {
            let location = session.navigate(input)?;
            tracing::info!(session_id = %session.id, url = %location.url, "Navigated");
            Ok(())
        })
    }

    pub fn go_back(&self, session_id: &str) -> Result<ShellView> {
        self.apply(session_id, |session| {
            if let Some(location) = session.go_back() {
                tracing::info!(session_id = %session.id, url = %location.url, "Went back");
            }
            Ok(())
        })
    }

    pub fn go_forward(&self, session_id: &str) -> Result<ShellView> {
        self.apply(session_id, |session| {
            if let Some(location) = session.go_forward() {
                tracing::info!(session_id = %session.id, url = %location.url, "Went forward");
            }
            Ok(())
        })
    }

    pub fn go_home(&self, session_id: &str) -> Result<ShellView> {
        self.apply(session_id, |session| {
            let location = session.home();
            tracing::info!(session_id = %session.id, url = %location.url, "Went home");
            Ok(())
        })
    }

    pub fn clear_history(&self, session_id: &str) -> Result<ShellView> {
        self.apply(session_id, |session| {
            session.clear_history();
            tracing::info!(session_id = %session.id, "Cleared history");
            Ok(())
        })
    }

    // === Presentation operations ===

    pub fn select_device(&self, session_id: &str, name: &str) -> Result<ShellView> {
        let preset = self
            .config
            .device(name.trim())
            .ok_or_else(|| CoreError::UnknownDevice(name.to_string()))?
            .name
            .clone();

        self.apply(session_id, |session| {
            tracing::debug!(session_id = %session.id, device = %preset, "Selected device");
            session.set_device(preset);
            Ok(())
        })
    }

    /// Feed a signal from the page script to the session's frame monitor.
    /// `generation` is the load the script was rendered for, when known.
    pub fn report_frame_signal(
        &self,
        session_id: &str,
        url: &str,
        generation: Option<u64>,
        signal: &str,
    ) -> Result<FrameVerdict> {
        let signal: FrameSignal = signal.parse()?;

        Ok(self.session_manager.with_session(session_id, |session| {
            session.observe_frame(url, generation, signal);
            Ok(FrameVerdict::from(session.frame()))
        })?)
    }

    fn apply<F>(&self, session_id: &str, f: F) -> Result<ShellView>
    where
        F: FnOnce(&mut Session) -> phoneframe_session::Result<()>,
    {
        Ok(self.session_manager.with_session(session_id, |session| {
            f(session)?;
            Ok(self.build_view(session))
        })?)
    }

    fn build_view(&self, session: &Session) -> ShellView {
        ShellView::build(session, &self.config)
    }
}
