use super::*;

#[test]
fn aspect_ratio_parses_presets_and_degrades_malformed() {
    assert_eq!(AspectRatio::parse("original"), AspectRatio::Original);
    assert_eq!(AspectRatio::parse("16:9"), AspectRatio::Ratio { w: 16, h: 9 });
    assert_eq!(AspectRatio::parse(" 9 : 16 "), AspectRatio::Ratio { w: 9, h: 16 });
    assert_eq!(AspectRatio::parse("0:3"), AspectRatio::Original);
    assert_eq!(AspectRatio::parse("4x3"), AspectRatio::Original);
    assert_eq!(AspectRatio::parse("a:b"), AspectRatio::Original);
    assert_eq!(AspectRatio::parse(""), AspectRatio::Original);
}

#[test]
fn aspect_ratio_tags_round_trip() {
    for ar in AspectRatio::PRESETS {
        assert_eq!(AspectRatio::parse(&ar.to_string()), ar);
    }
    assert_eq!(
        serde_json::to_string(&AspectRatio::Ratio { w: 4, h: 3 }).unwrap(),
        "\"4:3\""
    );
}

#[test]
fn effect_params_clamp_on_construction() {
    let p = EffectParams::new(1.7, 0.0, AspectRatio::Original);
    assert_eq!(p.filter_intensity(), 1.0);
    assert_eq!(p.resolution_scale(), MIN_RESOLUTION_SCALE);

    let p = EffectParams::new(-0.2, 4.0, AspectRatio::Original);
    assert_eq!(p.filter_intensity(), 0.0);
    assert_eq!(p.resolution_scale(), 1.0);

    let p = EffectParams::default().with_filter_intensity(f64::NAN);
    assert_eq!(p.filter_intensity(), 0.3);
}

#[test]
fn effect_params_deserialize_clamped_with_defaults() {
    let p: EffectParams =
        serde_json::from_str(r#"{"filterIntensity": 5, "aspectRatio": "2:3"}"#).unwrap();
    assert_eq!(p.filter_intensity(), 1.0);
    assert_eq!(p.resolution_scale(), 1.0);
    assert_eq!(p.aspect_ratio(), AspectRatio::Ratio { w: 2, h: 3 });
}

#[test]
fn effect_params_json_shape_is_camel_case() {
    let p = EffectParams::new(0.5, 0.5, AspectRatio::Ratio { w: 1, h: 1 });
    let v = serde_json::to_value(p).unwrap();
    assert_eq!(v["filterIntensity"], 0.5);
    assert_eq!(v["resolutionScale"], 0.5);
    assert_eq!(v["aspectRatio"], "1:1");
}

#[test]
fn logo_scale_rounds_and_clamps() {
    assert_eq!(normalize_logo_scale(1.04), 1.0);
    assert_eq!(normalize_logo_scale(1.25), 1.3);
    assert_eq!(normalize_logo_scale(0.01), MIN_LOGO_SCALE);
    assert_eq!(normalize_logo_scale(9.0), MAX_LOGO_SCALE);
    assert_eq!(normalize_logo_scale(f64::INFINITY), 1.0);
}
