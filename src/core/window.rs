use winit::window::{Fullscreen, Window};

/// Window dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowDimensions {
    pub width: u32,
    pub height: u32,
}

impl WindowDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height; a collapsed window reports 1.0
    pub fn aspect(&self) -> f32 {
        if self.width == 0 || self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Window abstraction - the parts of a window the demo drives
pub trait WindowContext {
    /// Get window dimensions in physical pixels
    fn dimensions(&self) -> WindowDimensions;

    /// Request the window to redraw
    fn request_redraw(&self);

    fn is_fullscreen(&self) -> bool;

    fn set_fullscreen(&self, fullscreen: bool);
}

/// Flip between windowed and borderless fullscreen, returning the new state
pub fn toggle_fullscreen(window: &dyn WindowContext) -> bool {
    let fullscreen = !window.is_fullscreen();
    window.set_fullscreen(fullscreen);
    fullscreen
}

impl WindowContext for Window {
    fn dimensions(&self) -> WindowDimensions {
        let size = self.inner_size();
        WindowDimensions::new(size.width, size.height)
    }

    fn request_redraw(&self) {
        Window::request_redraw(self);
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen().is_some()
    }

    fn set_fullscreen(&self, fullscreen: bool) {
        let mode = fullscreen.then_some(Fullscreen::Borderless(None));
        Window::set_fullscreen(self, mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[test]
    fn test_window_dimensions_aspect() {
        assert!((WindowDimensions::new(800, 600).aspect() - 4.0 / 3.0).abs() < 1e-6);
        assert_eq!(WindowDimensions::new(0, 600).aspect(), 1.0);
        assert_eq!(WindowDimensions::new(800, 0).aspect(), 1.0);
    }

    #[test]
    fn test_window_dimensions_empty() {
        assert!(WindowDimensions::new(0, 0).is_empty());
        assert!(WindowDimensions::new(10, 0).is_empty());
        assert!(!WindowDimensions::new(1, 1).is_empty());
    }

    struct MockWindow {
        dims: WindowDimensions,
        fullscreen: Cell<bool>,
        requests: RefCell<Vec<bool>>,
        redraws: Cell<usize>,
    }

    impl MockWindow {
        fn new(width: u32, height: u32) -> Self {
            Self {
                dims: WindowDimensions::new(width, height),
                fullscreen: Cell::new(false),
                requests: RefCell::new(Vec::new()),
                redraws: Cell::new(0),
            }
        }
    }

    impl WindowContext for MockWindow {
        fn dimensions(&self) -> WindowDimensions {
            self.dims
        }

        fn request_redraw(&self) {
            self.redraws.set(self.redraws.get() + 1);
        }

        fn is_fullscreen(&self) -> bool {
            self.fullscreen.get()
        }

        fn set_fullscreen(&self, fullscreen: bool) {
            self.requests.borrow_mut().push(fullscreen);
            self.fullscreen.set(fullscreen);
        }
    }

    #[test]
    fn test_toggle_fullscreen_alternates() {
        let window = MockWindow::new(640, 480);

        assert!(toggle_fullscreen(&window));
        assert!(window.is_fullscreen());
        assert!(!toggle_fullscreen(&window));
        assert!(!window.is_fullscreen());

        assert_eq!(*window.requests.borrow(), vec![true, false]);
    }

    #[test]
    fn test_window_context_redraw() {
        let window = MockWindow::new(800, 600);
        window.request_redraw();
        window.request_redraw();
        assert_eq!(window.redraws.get(), 2);
        assert_eq!(window.dimensions(), WindowDimensions::new(800, 600));
    }
}
