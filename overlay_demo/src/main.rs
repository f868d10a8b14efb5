//! Overlay demo application
//!
//! Builds a representative overlay scene (a titled panel with controls, a
//! draggable window, world-space markers and a trail) and drives it for a
//! few synthetic frames against the recording backend, logging what each
//! frame would have drawn. This is the toolkit equivalent of a smoke-test
//! scene: no real host engine is attached.

use overlay_ui::prelude::*;

/// Synthetic frame length
const FRAME_DT: f32 = 1.0 / 60.0;

struct DemoApp {
    screen: Screen,
    world: WorldRenderer,
    content: NullContent,
    placements: MemoryPlacementStore,
    backend: RecordingBackend,
    checkbox: ControlKey,
}

impl DemoApp {
    fn new() -> Self {
        log::info!("Creating overlay demo...");
        let mut screen = Screen::new(Vec2::new(1920.0, 1080.0));
        let root = screen.root();

        log::info!("Building session panel...");
        let tree = screen.tree_mut();
        let panel = tree.add_container(Panel::titled("Session").with_wheel_scrolling());
        tree.set_location(panel, Vec2::new(40.0, 40.0));
        tree.set_size(panel, Vec2::new(320.0, 240.0));
        tree.try_set_parent(panel, Some(root)).unwrap();

        let flow = tree.add_container(FlowPanel::with_direction(
            FlowDirection::TopToBottom,
            Vec2::new(4.0, 4.0),
        ));
        tree.set_size(flow, Vec2::new(300.0, 200.0));
        tree.try_set_parent(flow, Some(panel)).unwrap();

        let ready = tree.add(Button::new("Ready"));
        tree.try_set_parent(ready, Some(flow)).unwrap();

        let checkbox = tree.add(Checkbox::new("Show markers"));
        tree.try_set_parent(checkbox, Some(flow)).unwrap();

        let volume = tree.add(Slider::new(0.0, 100.0, 80.0));
        tree.try_set_parent(volume, Some(flow)).unwrap();

        let name = tree.add(TextBox::new().with_placeholder("character name"));
        tree.try_set_parent(name, Some(flow)).unwrap();

        log::info!("Building stats window...");
        let window = tree.add_container(Window::new("Stats").with_placement_id("stats-window"));
        tree.set_location(window, Vec2::new(500.0, 120.0));
        tree.try_set_parent(window, Some(root)).unwrap();

        let label = tree.add(Label::new("Damage per second: 12,345"));
        tree.try_set_parent(label, Some(window)).unwrap();

        let tooltip = tree.add(Tooltip::new("Toggles world-space markers"));
        screen.attach_tooltip(checkbox, tooltip);

        log::info!("Placing world markers and trail...");
        let mut world = WorldRenderer::new();
        for i in 0..4 {
            let mut marker = Marker::new(
                Vec3::new(i as f32 * 6.0, 1.5, -10.0),
                "textures/marker-waypoint",
            );
            marker.entity.fade_near = 40.0;
            marker.entity.fade_far = 60.0;
            world.add_marker(marker);
        }
        let trail = Trail::new(
            (0..24)
                .map(|i| Vec3::new(i as f32, 0.1, -10.0 + (i as f32 * 0.4).sin() * 2.0))
                .collect(),
            "textures/trail-guide",
        );
        world.add_trail(trail);

        // React to checkbox toggles through the event system
        screen.events_mut().register_handler(
            UiEventKind::ValueChanged,
            Box::new(|event: &UiEvent| {
                if let UiEvent::ValueChanged { value, .. } = event {
                    log::info!("value changed: {value:?}");
                }
                false
            }),
        );

        Self {
            screen,
            world,
            content: NullContent,
            placements: MemoryPlacementStore::default(),
            backend: RecordingBackend::new(),
            checkbox,
        }
    }

    fn frame(&mut self, index: usize, pointer_events: &[PointerEvent]) {
        for event in pointer_events {
            let outcome = self
                .screen
                .handle_pointer(&self.content, &mut self.placements, event);
            log::debug!(
                "pointer {:?} -> target {:?}, blocks host: {}",
                event.kind,
                outcome.target,
                outcome.blocks_host
            );
        }

        let events = self
            .screen
            .update(&self.content, &mut self.placements, FRAME_DT);
        self.world.update(&self.content, FRAME_DT);

        self.screen
            .paint(&self.content, &mut self.backend)
            .expect("overlay pass failed");
        let camera = Camera {
            position: Vec3::new(8.0, 4.0, 6.0),
            up: Vec3::new(0.0, 1.0, 0.0),
        };
        self.world
            .render(&camera, &mut self.backend)
            .expect("world pass failed");

        log::info!(
            "frame {index}: {} ui events, {} draw commands, {} marker verts, {} trail verts",
            events.len(),
            self.backend.commands.len(),
            self.backend.marker_vertices.len(),
            self.backend.trail_vertices.len(),
        );
    }
}

fn main() {
    env_logger::init();
    let mut app = DemoApp::new();

    // Frame 0: initial layout settles
    app.frame(0, &[]);

    // Frame 1: hover the checkbox (its tooltip appears)
    let checkbox_center = app.screen.tree().absolute_bounds(app.checkbox).center();
    app.frame(
        1,
        &[PointerEvent::new(PointerEventKind::Moved, checkbox_center, 0.1)],
    );

    // Frame 2: click it
    app.frame(
        2,
        &[
            PointerEvent::new(PointerEventKind::LeftPressed, checkbox_center, 0.2),
            PointerEvent::new(PointerEventKind::LeftReleased, checkbox_center, 0.3),
        ],
    );

    // Frame 3: idle
    app.frame(3, &[]);

    log::info!("demo complete");
}
