//! Session data structure

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use phoneframe_frame::{FrameLoadState, FrameMonitor, FrameSignal};
use phoneframe_navigation::{Location, NavigationController};

use crate::Result;

#[derive(Debug, Clone)]
pub struct Session {
    /// Unique identifier
    pub id: String,
    /// When the session was created
    pub created_at: DateTime<Utc>,
    /// Last user activity
    pub updated_at: DateTime<Utc>,
    navigation: NavigationController,
    frame: FrameMonitor,
    /// Selected device preset name
    device: String,
}

impl Session {
    pub fn new(start: Location, device: String, retry_budget: u32) -> Self {
        let now = Utc::now();
        let frame = FrameMonitor::new(start.url.clone(), retry_budget);

        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            navigation: NavigationController::new(start),
            frame,
            device,
        }
    }

    /// Navigate to typed input. The session is unchanged on error.
    pub fn navigate(&mut self, raw_input: &str) -> Result<Location> {
        let location = self.navigation.navigate(raw_input)?;
        self.frame.begin(location.url.clone());
        self.touch();
        Ok(location)
    }

    pub fn home(&mut self) -> Location {
        let location = self.navigation.home();
        self.frame.begin(location.url.clone());
        self.touch();
        location
    }

    pub fn go_back(&mut self) -> Option<Location> {
        let location = self.navigation.go_back()?;
        self.frame.begin(location.url.clone());
        self.touch();
        Some(location)
    }

    pub fn go_forward(&mut self) -> Option<Location> {
        let location = self.navigation.go_forward()?;
        self.frame.begin(location.url.clone());
        self.touch();
        Some(location)
    }

    pub fn clear_history(&mut self) {
        self.navigation.clear_history();
        self.frame.begin(self.navigation.current().url.clone());
        self.touch();
    }

    /// Feed a frame signal to the monitor. Never touches the history.
    pub fn observe_frame(
        &mut self,
        url: &str,
        generation: Option<u64>,
        signal: FrameSignal,
    ) -> FrameLoadState {
        self.updated_at = Utc::now();
        self.frame.observe(url, generation, signal)
    }

    pub fn set_device(&mut self, device: String) {
        self.device = device;
        self.touch();
    }

    pub fn current(&self) -> &Location {
        self.navigation.current()
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    pub fn frame(&self) -> &FrameMonitor {
        &self.frame
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    /// True once the session has seen no activity for `timeout`
    pub fn is_idle(&self, now: DateTime<Utc>, timeout: Duration) -> bool {
        now - self.updated_at >= timeout
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phoneframe_frame::ContentProbe;

    fn session() -> Session {
        Session::new(
            Location::new("https://start.test", "start.test"),
            "Phone".to_string(),
            2,
        )
    }

    #[test]
    fn test_new_session() {
        let session = session();
        assert_eq!(session.current().url, "https://start.test");
        assert_eq!(session.device(), "Phone");
        assert_eq!(session.frame().url(), "https://start.test");
        assert_eq!(session.frame().state(), FrameLoadState::Loading);
    }

    #[test]
    fn test_navigation_restarts_frame_monitor() {
        let mut session = session();
        session.observe_frame("https://start.test", None, FrameSignal::Error);
        assert!(session.frame().shows_fallback());

        session.navigate("example.com").unwrap();
        assert_eq!(session.frame().url(), "https://example.com");
        assert_eq!(session.frame().state(), FrameLoadState::Loading);

        session.go_back().unwrap();
        assert_eq!(session.frame().url(), "https://start.test");
    }

    #[test]
    fn test_noop_back_keeps_frame_state() {
        let mut session = session();
        session.observe_frame(
            "https://start.test",
            None,
            FrameSignal::Load(ContentProbe::Opaque),
        );

        assert!(session.go_back().is_none());
        assert!(session.go_forward().is_none());
        assert_eq!(session.frame().state(), FrameLoadState::Loaded);
    }

    #[test]
    fn test_failed_navigate_leaves_frame_alone() {
        let mut session = session();
        session.observe_frame(
            "https://start.test",
            None,
            FrameSignal::Load(ContentProbe::Present),
        );

        assert!(session.navigate("").is_err());
        assert_eq!(session.frame().state(), FrameLoadState::Loaded);
        assert_eq!(session.navigation().history().len(), 1);
    }

    #[test]
    fn test_frame_signals_never_touch_history() {
        let mut session = session();
        session.navigate("a.test").unwrap();

        for _ in 0..5 {
            session.observe_frame(
                "https://a.test",
                None,
                FrameSignal::Heartbeat(ContentProbe::Opaque),
            );
        }
        assert_eq!(session.frame().state(), FrameLoadState::Failed);
        assert_eq!(session.navigation().history().len(), 2);
        assert_eq!(session.current().url, "https://a.test");
    }

    #[test]
    fn test_home_on_home_starts_new_generation() {
        let mut session = session();
        session.home();
        let previous = session.frame().generation();

        session.home();
        assert_eq!(session.frame().generation(), previous + 1);

        // The previous document's error arrives late
        session.observe_frame("https://start.test", Some(previous), FrameSignal::Error);
        assert_eq!(session.frame().state(), FrameLoadState::Loading);
    }

    #[test]
    fn test_idle() {
        let session = session();
        let timeout = Duration::seconds(60);
        assert!(!session.is_idle(session.updated_at, timeout));
        assert!(session.is_idle(session.updated_at + Duration::seconds(61), timeout));
    }
}
