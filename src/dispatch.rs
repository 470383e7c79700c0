//! Frame-loop callback registration.
//!
//! Thin glue between the bootstrap and the engine's per-frame hooks. The
//! external loop decides order and cadence; this module only stores the
//! callbacks and exposes the dispatch entry points the loop invokes.

/// A registered per-frame callback.
pub type Callback = Box<dyn FnMut()>;

/// The four callback roles the bootstrap wires up.
pub struct FrameHandlers {
    /// Input-event handler.
    pub input: Callback,
    /// Per-tick simulation handler.
    pub tick: Callback,
    /// Scene draw handler.
    pub draw_scene: Callback,
    /// Overlay/HUD draw handler.
    pub draw_hud: Callback,
}

/// Holds the registered callbacks for each per-frame hook.
#[derive(Default)]
pub struct FrameDispatcher {
    on_input: Vec<Callback>,
    on_tick: Vec<Callback>,
    on_draw_scene: Vec<Callback>,
    on_draw_hud: Vec<Callback>,
}

impl FrameDispatcher {
    /// Register an input handler.
    pub fn register_input(&mut self, callback: Callback) {
        self.on_input.push(callback);
    }

    /// Register a per-tick handler.
    pub fn register_tick(&mut self, callback: Callback) {
        self.on_tick.push(callback);
    }

    /// Register a scene draw handler.
    pub fn register_draw_scene(&mut self, callback: Callback) {
        self.on_draw_scene.push(callback);
    }

    /// Register an overlay/HUD draw handler.
    pub fn register_draw_hud(&mut self, callback: Callback) {
        self.on_draw_hud.push(callback);
    }

    /// Register all four roles at once, in hook order.
    pub fn register(&mut self, handlers: FrameHandlers) {
        self.register_input(handlers.input);
        self.register_tick(handlers.tick);
        self.register_draw_scene(handlers.draw_scene);
        self.register_draw_hud(handlers.draw_hud);
        log::debug!("frame callbacks registered");
    }

    /// Invoke every input handler (called by the external loop).
    pub fn dispatch_input(&mut self) {
        for callback in &mut self.on_input {
            callback();
        }
    }

    /// Invoke every per-tick handler.
    pub fn dispatch_tick(&mut self) {
        for callback in &mut self.on_tick {
            callback();
        }
    }

    /// Invoke every scene draw handler.
    pub fn dispatch_draw_scene(&mut self) {
        for callback in &mut self.on_draw_scene {
            callback();
        }
    }

    /// Invoke every HUD draw handler.
    pub fn dispatch_draw_hud(&mut self) {
        for callback in &mut self.on_draw_hud {
            callback();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_registered_callbacks_fire_on_their_hook() {
        let ticks = Rc::new(Cell::new(0));
        let draws = Rc::new(Cell::new(0));

        let mut dispatcher = FrameDispatcher::default();
        let t = Rc::clone(&ticks);
        dispatcher.register_tick(Box::new(move || t.set(t.get() + 1)));
        let d = Rc::clone(&draws);
        dispatcher.register_draw_scene(Box::new(move || d.set(d.get() + 1)));

        dispatcher.dispatch_tick();
        dispatcher.dispatch_tick();
        dispatcher.dispatch_draw_scene();

        assert_eq!(ticks.get(), 2);
        assert_eq!(draws.get(), 1);
    }

    #[test]
    fn test_register_wires_all_four_roles() {
        let count = Rc::new(Cell::new(0));
        let bump = |c: &Rc<Cell<u32>>| -> Callback {
            let c = Rc::clone(c);
            Box::new(move || c.set(c.get() + 1))
        };

        let mut dispatcher = FrameDispatcher::default();
        dispatcher.register(FrameHandlers {
            input: bump(&count),
            tick: bump(&count),
            draw_scene: bump(&count),
            draw_hud: bump(&count),
        });

        dispatcher.dispatch_input();
        dispatcher.dispatch_tick();
        dispatcher.dispatch_draw_scene();
        dispatcher.dispatch_draw_hud();
        assert_eq!(count.get(), 4);
    }
}
