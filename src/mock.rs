//! Mock application context and mode catalog for testing without hardware.

use std::sync::{Arc, Mutex};

use crate::traits::{ModeCatalog, ModeController, ModeError, Result, UiEvent};

/// Mock application context recording every controller built against it.
#[derive(Debug, Clone, Default)]
pub struct MockApp {
    created: Arc<Mutex<Vec<String>>>,
    events: Arc<Mutex<Vec<String>>>,
}

impl MockApp {
    /// Tags of the controllers created so far, oldest first.
    pub fn created(&self) -> Vec<String> {
        self.created.lock().expect("created log poisoned").clone()
    }

    /// Lifecycle events reported by controllers, as `"<tag>:<event>"`.
    pub fn events(&self) -> Vec<String> {
        self.events.lock().expect("event log poisoned").clone()
    }
}

/// Mock controller that reports its lifecycle to the owning [`MockApp`].
pub struct MockController {
    tag: &'static str,
    events: Arc<Mutex<Vec<String>>>,
    running: bool,
}

impl MockController {
    /// Create a controller tagged `tag` and record its creation on `app`.
    pub fn new(tag: &'static str, app: &MockApp) -> Self {
        app.created
            .lock()
            .expect("created log poisoned")
            .push(tag.to_owned());
        Self {
            tag,
            events: Arc::clone(&app.events),
            running: false,
        }
    }

    fn record(&self, event: &str) {
        self.events
            .lock()
            .expect("event log poisoned")
            .push(format!("{}:{event}", self.tag));
    }
}

impl ModeController for MockController {
    fn start_capture(&mut self) -> Result<()> {
        if self.running {
            return Err(ModeError::Controller(format!("{} already running", self.tag)));
        }
        self.running = true;
        self.record("start");
        Ok(())
    }

    fn stop_capture(&mut self) -> Result<()> {
        if !self.running {
            return Err(ModeError::Controller(format!("{} not running", self.tag)));
        }
        self.running = false;
        self.record("stop");
        Ok(())
    }

    fn handle_event(&mut self, event: UiEvent) -> bool {
        if !self.running {
            return false;
        }
        self.record(&format!("{event:?}"));
        true
    }
}

/// Catalog building a [`MockController`] tagged with the method name.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockCatalog;

impl ModeCatalog<MockApp> for MockCatalog {
    fn photo(&self, app: &MockApp) -> Box<dyn ModeController> {
        Box::new(MockController::new("photo", app))
    }

    fn video(&self, app: &MockApp) -> Box<dyn ModeController> {
        Box::new(MockController::new("video", app))
    }

    fn wide_angle_panorama(&self, app: &MockApp) -> Box<dyn ModeController> {
        Box::new(MockController::new("wide_angle_panorama", app))
    }

    fn photo_sphere(&self, app: &MockApp) -> Box<dyn ModeController> {
        Box::new(MockController::new("photo_sphere", app))
    }

    fn refocus(&self, app: &MockApp) -> Box<dyn ModeController> {
        Box::new(MockController::new("refocus", app))
    }

    fn hdr(&self, app: &MockApp) -> Box<dyn ModeController> {
        Box::new(MockController::new("hdr", app))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_controller_lifecycle() {
        let app = MockApp::default();
        let mut controller = MockCatalog.video(&app);

        assert!(!controller.handle_event(UiEvent::ShutterPressed));
        controller.start_capture().expect("start should succeed");
        assert!(controller.handle_event(UiEvent::ShutterPressed));
        controller.stop_capture().expect("stop should succeed");

        assert_eq!(app.created(), vec!["video".to_owned()]);
        assert_eq!(
            app.events(),
            vec![
                "video:start".to_owned(),
                "video:ShutterPressed".to_owned(),
                "video:stop".to_owned(),
            ]
        );
    }

    #[test]
    fn test_mock_controller_rejects_double_start() {
        let app = MockApp::default();
        let mut controller = MockCatalog.photo(&app);

        controller.start_capture().expect("start should succeed");
        assert!(controller.start_capture().is_err());
        controller.stop_capture().expect("stop should succeed");
        assert!(controller.stop_capture().is_err());
    }
}
