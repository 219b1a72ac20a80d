use super::*;

#[test]
fn small_raster_is_shown_at_native_size() {
    let vp = Viewport::fit(Size::new(300.0, 200.0), 800.0, 1000.0);
    assert_eq!(vp.display_size(), Size::new(300.0, 200.0));
    assert_eq!(vp.to_raster(Point::new(10.0, 20.0)), Point::new(10.0, 20.0));
}

#[test]
fn wide_raster_fits_container_width() {
    let vp = Viewport::fit(Size::new(2000.0, 1000.0), 500.0, 10_000.0);
    assert_eq!(vp.display_size(), Size::new(500.0, 250.0));
    assert_eq!(vp.to_raster(Point::new(250.0, 125.0)), Point::new(1000.0, 500.0));
}

#[test]
fn tall_raster_fits_seventy_percent_of_viewport() {
    let vp = Viewport::fit(Size::new(1000.0, 2000.0), 1000.0, 1000.0);
    let d = vp.display_size();
    assert!((d.height - 700.0).abs() < 1e-9);
    assert!((d.width - 350.0).abs() < 1e-9);
}
