use drawpp::cursor::{Cursor, Precision};
use drawpp::draw::{Canvas, primitives};
use drawpp::scene::{RenderSettings, Scene};

const WHITE: [u8; 4] = [255, 255, 255, 255];
const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

fn render(scene: &Scene, settings: &RenderSettings) -> Canvas {
    let mut canvas = Canvas::new(800, 800, settings.background).expect("canvas");
    canvas
        .draw(settings.ink, |surface| scene.render(surface, settings))
        .expect("cairo context")
        .expect("scene renders");
    canvas
}

#[test]
fn shapes_demo_draws_square_circle_line_and_arc() {
    let mut canvas = render(&Scene::Shapes, &RenderSettings::default());

    // Square covers [100, 300) on both axes.
    assert_eq!(canvas.pixel(100, 100), Some(RED));
    assert_eq!(canvas.pixel(299, 299), Some(RED));
    assert_eq!(canvas.pixel(300, 250), Some(WHITE));

    // Filled disk around (400, 400).
    assert_eq!(canvas.pixel(400, 400), Some(RED));
    assert_eq!(canvas.pixel(450, 360), Some(RED));

    // Diagonal line beyond the disk.
    assert_eq!(canvas.pixel(600, 600), Some(RED));
    assert_eq!(canvas.pixel(700, 700), Some(RED));
    assert_eq!(canvas.pixel(600, 650), Some(WHITE));

    // Untouched corner.
    assert_eq!(canvas.pixel(750, 50), Some(WHITE));
}

#[test]
fn arc_is_dotted_outside_the_disk() {
    let settings = RenderSettings::default();
    let mut canvas = Canvas::new(800, 800, settings.background).expect("canvas");
    canvas
        .draw(settings.shapes, |s| primitives::draw_arc(s, 400, 400, 150, 0, 90))
        .expect("cairo context");

    assert_eq!(canvas.pixel(550, 400), Some(RED));
    assert_eq!(canvas.pixel(400, 550), Some(RED));
    let (x, y) = primitives::arc_point(400, 400, 150, 45);
    assert_eq!(canvas.pixel(x, y), Some(RED));
    assert_eq!(canvas.pixel(400, 400), Some(WHITE));
}

#[test]
fn cursor_demo_marks_start_in_blue() {
    let scene = Scene::demo("cursor").expect("known demo");
    let settings = RenderSettings {
        cursor: Cursor::default().with_precision(Precision::Truncate),
        ..RenderSettings::default()
    };
    let mut canvas = render(&scene, &settings);

    // Marker disk around the start position, clear of every edge.
    assert_eq!(canvas.pixel(403, 397), Some(BLUE));
    assert_eq!(canvas.pixel(0, 0), Some(WHITE));
}

#[test]
fn star_script_renders_markers_and_lines() {
    let scene = Scene::demo("star").expect("bundled script");
    let mut canvas = render(&scene, &RenderSettings::default());

    // First marker lands one step from the start at (500, 490). The next
    // edge leaves it heading left, so its lower right stays blue.
    assert_eq!(canvas.pixel(503, 492), Some(BLUE));
    // The first edge runs from (400, 400) to (500, 490); its midpoint is ink.
    let ink = canvas.pixel(450, 445).expect("inside canvas");
    assert_ne!(ink, WHITE);
}

#[test]
fn negative_square_fills_up_and_left_of_its_corner() {
    let settings = RenderSettings::default();
    let mut canvas = Canvas::new(800, 800, settings.background).expect("canvas");
    canvas
        .draw(settings.shapes, |s| primitives::draw_square(s, 300, 300, -20))
        .expect("cairo context");

    assert_eq!(canvas.pixel(280, 280), Some(RED));
    assert_eq!(canvas.pixel(299, 299), Some(RED));
    assert_eq!(canvas.pixel(300, 300), Some(WHITE));
    assert_eq!(canvas.pixel(279, 290), Some(WHITE));
}
