use super::*;

fn ratio(w: u32, h: u32) -> AspectRatio {
    AspectRatio::Ratio { w, h }
}

#[test]
fn original_keeps_full_frame() {
    let plan = plan_crop(PixelSize::new(640, 480), AspectRatio::Original, 1.0);
    assert_eq!(plan.source_rect, Rect::new(0.0, 0.0, 640.0, 480.0));
    assert_eq!(plan.dest_size, PixelSize::new(640, 480));
}

#[test]
fn square_on_wide_image_centers_horizontally() {
    let plan = plan_crop(PixelSize::new(200, 100), ratio(1, 1), 1.0);
    assert_eq!(plan.source_rect, Rect::new(50.0, 0.0, 150.0, 100.0));
    assert_eq!(plan.dest_size, PixelSize::new(100, 100));
    assert_eq!(
        plan.source_pixels(PixelSize::new(200, 100)),
        PixelRect {
            x: 50,
            y: 0,
            width: 100,
            height: 100
        }
    );
}

#[test]
fn wide_ratio_on_tall_image_centers_vertically() {
    let plan = plan_crop(PixelSize::new(900, 1600), ratio(16, 9), 1.0);
    let r = plan.source_rect;
    assert_eq!(r.x0, 0.0);
    assert_eq!(r.width(), 900.0);
    assert!((r.height() - 506.25).abs() < 1e-9);
    assert!((r.y0 - (1600.0 - 506.25) / 2.0).abs() < 1e-9);
    assert_eq!(plan.dest_size, PixelSize::new(900, 506));
}

#[test]
fn half_scale_halves_the_crop() {
    let plan = plan_crop(PixelSize::new(400, 300), AspectRatio::Original, 0.5);
    assert_eq!(plan.dest_size, PixelSize::new(200, 150));

    let plan = plan_crop(PixelSize::new(400, 300), ratio(1, 1), 0.5);
    assert_eq!(plan.dest_size, PixelSize::new(150, 150));
}

#[test]
fn scale_never_enlarges() {
    let plan = plan_crop(PixelSize::new(400, 300), AspectRatio::Original, 3.0);
    assert_eq!(plan.dest_size, PixelSize::new(400, 300));
}

#[test]
fn tiny_scale_keeps_one_pixel() {
    let plan = plan_crop(PixelSize::new(3, 3), AspectRatio::Original, 0.01);
    assert_eq!(plan.dest_size, PixelSize::new(1, 1));
}

#[test]
fn empty_source_yields_empty_plan() {
    let plan = plan_crop(PixelSize::new(0, 10), ratio(1, 1), 1.0);
    assert!(plan.is_empty());
    assert_eq!(
        plan.source_pixels(PixelSize::new(0, 10)),
        PixelRect::default()
    );
}

#[test]
fn source_pixels_stay_inside_bounds() {
    let plan = plan_crop(PixelSize::new(101, 50), ratio(1, 1), 1.0);
    let px = plan.source_pixels(PixelSize::new(101, 50));
    assert!(px.x + px.width <= 101);
    assert_eq!(px.height, 50);
}
