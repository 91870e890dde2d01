use std::sync::Arc;

use bootcamp_utils::color::ColorMapper;
use bootcamp_utils::display::{
    Axis, ColorMapping, ImageSource, Imshow, ImshowParams, Layout, imshow,
};
use bootcamp_utils::error::ErrorKind;
use bootcamp_utils::pixels::{Image, PackedImage};
use bootcamp_utils::style::Toolbar;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn ramp() -> Image {
    Image::gray(2, 3, vec![0u8, 1, 2, 3, 4, 5]).unwrap()
}

fn intensity(shown: &Imshow) -> (Vec<f64>, ColorMapper) {
    match &shown.layout.figure().renderers[0].source {
        ImageSource::Intensity {
            image,
            color_mapper,
        } => (image.data.clone(), color_mapper.clone()),
        ImageSource::Rgba(_) => panic!("expected an intensity glyph"),
    }
}

fn packed(shown: &Imshow) -> PackedImage {
    match &shown.layout.figure().renderers[0].source {
        ImageSource::Rgba(p) => p.clone(),
        ImageSource::Intensity { .. } => panic!("expected an RGBA glyph"),
    }
}

#[test]
fn intensity_image_defaults() {
    init_logging();
    let shown = imshow(&ramp(), &ImshowParams::default()).unwrap();
    let fig = shown.layout.figure();

    assert_eq!(fig.frame_height, 400);
    assert_eq!(fig.frame_width, 600);
    assert_eq!(fig.x_range, (0.0, 3.0));
    assert_eq!(fig.y_range, (0.0, 2.0));
    assert_eq!(fig.toolbar_location, Toolbar::Right);
    assert!(fig.colorbar.is_none());
    assert_eq!(fig.x_axis, Axis::labeled("pixels"));
    assert_eq!(fig.y_axis, Axis::labeled("pixels"));
    assert!(shown.image.is_none());
    assert!(matches!(shown.layout, Layout::Figure(_)));

    let (data, mapper) = intensity(&shown);
    // Flipped: the last row is stored first.
    assert_eq!(data, vec![3.0, 4.0, 5.0, 0.0, 1.0, 2.0]);
    assert_eq!((mapper.low, mapper.high), (0.0, 5.0));
    assert_eq!(mapper.palette, ColorMapper::viridis().palette);
}

#[test]
fn without_flip_rows_keep_their_order() {
    let params = ImshowParams {
        flip: false,
        ..Default::default()
    };
    let (data, _) = intensity(&imshow(&ramp(), &params).unwrap());
    assert_eq!(data, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);
}

#[test]
fn explicit_intensity_bounds_set_the_mapper_range() {
    let params = ImshowParams {
        min_intensity: Some(-1.0),
        max_intensity: Some(10.0),
        color_mapper: ColorMapping::Named("greys".into()),
        ..Default::default()
    };
    let (_, mapper) = intensity(&imshow(&ramp(), &params).unwrap());
    assert_eq!((mapper.low, mapper.high), (-1.0, 10.0));
    assert_eq!(mapper.palette, ColorMapper::greys().palette);
}

#[test]
fn explicit_mapper_is_used() {
    let custom = ColorMapper::from_hex(&["#000000", "#ffffff"]).unwrap();
    let params = ImshowParams {
        color_mapper: ColorMapping::Mapper(custom.clone()),
        ..Default::default()
    };
    let (_, mapper) = intensity(&imshow(&ramp(), &params).unwrap());
    assert_eq!(mapper.palette, custom.palette);
    assert_eq!((mapper.low, mapper.high), (0.0, 5.0));
}

#[test]
fn frame_and_data_ranges() {
    let params = ImshowParams {
        frame_height: 200,
        interpixel_distance: 0.5,
        ..Default::default()
    };
    let shown = imshow(&ramp(), &params).unwrap();
    let fig = shown.layout.figure();
    assert_eq!(fig.frame_width, 300);
    assert_eq!(fig.x_range, (0.0, 1.5));
    assert_eq!(fig.y_range, (0.0, 1.0));
    let glyph = &fig.renderers[0];
    assert_eq!((glyph.x, glyph.y, glyph.dw, glyph.dh), (0.0, 0.0, 1.5, 1.0));

    let params = ImshowParams {
        frame_width: Some(123),
        x_range: Some((10.0, 20.0)),
        y_range: Some((-1.0, 1.0)),
        ..Default::default()
    };
    let shown = imshow(&ramp(), &params).unwrap();
    let fig = shown.layout.figure();
    assert_eq!(fig.frame_width, 123);
    let glyph = &fig.renderers[0];
    assert_eq!((glyph.x, glyph.y, glyph.dw, glyph.dh), (10.0, -1.0, 10.0, 2.0));
}

#[test]
fn a_single_range_is_ignored() {
    let params = ImshowParams {
        x_range: Some((10.0, 20.0)),
        ..Default::default()
    };
    let shown = imshow(&ramp(), &params).unwrap();
    assert_eq!(shown.layout.figure().x_range, (0.0, 3.0));
}

#[test]
fn axis_labels_and_ticks() {
    let params = ImshowParams {
        length_units: "µm".into(),
        x_axis_label: Some("x position".into()),
        title: Some("cells".into()),
        ..Default::default()
    };
    let shown = imshow(&ramp(), &params).unwrap();
    let fig = shown.layout.figure();
    assert_eq!(fig.x_axis.label.as_deref(), Some("x position"));
    assert_eq!(fig.y_axis.label.as_deref(), Some("µm"));
    assert_eq!(fig.title.as_deref(), Some("cells"));

    let params = ImshowParams {
        no_ticks: true,
        x_axis_label: Some("ignored".into()),
        ..Default::default()
    };
    let shown = imshow(&ramp(), &params).unwrap();
    assert_eq!(shown.layout.figure().x_axis, Axis::bare());
    assert_eq!(shown.layout.figure().y_axis, Axis::bare());
}

#[test]
fn colorbar_for_intensity_images() {
    let params = ImshowParams {
        colorbar: true,
        ..Default::default()
    };
    let shown = imshow(&ramp(), &params).unwrap();
    let fig = shown.layout.figure();
    assert_eq!(fig.toolbar_location, Toolbar::Above);
    let bar = fig.colorbar.as_ref().unwrap();
    assert_eq!(bar.label_standoff, 12);
    assert!(!bar.border_line);
    assert_eq!(bar.location, (0.0, 0.0));
    assert_eq!((bar.color_mapper.low, bar.color_mapper.high), (0.0, 5.0));
}

#[test]
fn merge_names_are_rejected_for_intensity_images() {
    for name in ["rgb", "cmy", "no-such-map"] {
        let params = ImshowParams {
            color_mapper: ColorMapping::Named(name.into()),
            ..Default::default()
        };
        let err = imshow(&ramp(), &params).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidColorMapper, "{name}");
    }
}

#[test]
fn rgb_merge_packs_channels() {
    init_logging();
    let im = Image::stacked(1, 2, 3, vec![0.0, 0.5, 1.0, 1.0, 0.5, 0.0]).unwrap();
    let params = ImshowParams {
        color_mapper: ColorMapping::Named("rgb".into()),
        ..Default::default()
    };
    let p = packed(&imshow(&im, &params).unwrap());
    assert_eq!((p.rows, p.cols), (1, 2));
    // The constant green channel becomes a positivity mask.
    assert_eq!(PackedImage::unpack(p.get(0, 0)), [0, 255, 255, 255]);
    assert_eq!(PackedImage::unpack(p.get(0, 1)), [255, 255, 0, 255]);
}

#[test]
fn two_channels_default_to_cmy() {
    let im = Image::stacked(1, 2, 2, vec![0u8, 10, 20, 0]).unwrap();
    let shown = imshow(&im, &ImshowParams::default()).unwrap();
    let p = packed(&shown);
    // cyan = [0, 1], magenta = [1, 0], yellow = 0.
    // R = m + y, G = c + y, B = c + m, each then divided by its max.
    assert_eq!(PackedImage::unpack(p.get(0, 0)), [255, 0, 255, 255]);
    assert_eq!(PackedImage::unpack(p.get(0, 1)), [0, 255, 255, 255]);
}

#[test]
fn colorbar_is_skipped_for_color_images() {
    let im = Image::stacked(2, 2, 3, vec![0.25; 12]).unwrap();
    let params = ImshowParams {
        colorbar: true,
        ..Default::default()
    };
    let shown = imshow(&im, &params).unwrap();
    let fig = shown.layout.figure();
    assert!(fig.colorbar.is_none());
    assert_eq!(fig.toolbar_location, Toolbar::Above);

    // Every channel is constant, so each becomes an all-ones mask and the
    // merged frame is white everywhere.
    let p = packed(&shown);
    for r in 0..2 {
        for c in 0..2 {
            assert_eq!(PackedImage::unpack(p.get(r, c)), [255, 255, 255, 255]);
        }
    }
}

#[test]
fn palettes_are_rejected_for_color_images() {
    let im = Image::stacked(2, 2, 2, vec![0.25; 8]).unwrap();
    for mapping in [
        ColorMapping::Named("viridis".into()),
        ColorMapping::Mapper(ColorMapper::greys()),
    ] {
        let params = ImshowParams {
            color_mapper: mapping,
            ..Default::default()
        };
        let err = imshow(&im, &params).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidColorMapper);
    }
}

#[test]
fn unsupported_shapes() {
    let four = Image::stacked(1, 1, 4, vec![1u8, 2, 3, 4]).unwrap();
    let err = imshow(&four, &ImshowParams::default()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnsupportedChannelCount);

    let err = Image::new(&[1, 1, 1, 1], vec![1u8]).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidDimensions);
}

#[test]
fn single_channel_stack_is_shown_as_intensity() {
    let im = Image::stacked(1, 2, 1, vec![3u8, 7]).unwrap();
    let (data, mapper) = intensity(&imshow(&im, &ImshowParams::default()).unwrap());
    assert_eq!(data, vec![3.0, 7.0]);
    assert_eq!((mapper.low, mapper.high), (3.0, 7.0));
}

#[test]
fn deep_images_are_normalized() {
    let im = Image::gray(1, 2, vec![0u16, 1000]).unwrap();
    let (data, mapper) = intensity(&imshow(&im, &ImshowParams::default()).unwrap());
    assert_eq!(data, vec![0.0, 1.0]);
    assert_eq!((mapper.low, mapper.high), (0.0, 1.0));
}

#[test]
fn bool_images_become_integers() {
    let im = Image::gray(1, 2, vec![true, false]).unwrap();
    let (data, mapper) = intensity(&imshow(&im, &ImshowParams::default()).unwrap());
    assert_eq!(data, vec![1.0, 0.0]);
    assert_eq!((mapper.low, mapper.high), (0.0, 1.0));
}

#[test]
fn tight_channel_bounds_fail() {
    let im = Image::stacked(1, 2, 2, vec![0.1, 0.2, 0.5, 0.6]).unwrap();
    let params = ImshowParams {
        max_intensity: Some(0.3),
        ..Default::default()
    };
    let err = imshow(&im, &params).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidChannelBound);
}

#[test]
fn click_panel_and_returned_renderer() {
    let params = ImshowParams {
        display_clicks: true,
        return_im: true,
        ..Default::default()
    };
    let mut shown = imshow(&ramp(), &params).unwrap();
    let handle = shown.image.clone().unwrap();
    assert!(Arc::ptr_eq(&handle, &shown.layout.figure().renderers[0]));

    assert!(matches!(shown.layout, Layout::Row { .. }));
    assert!(shown.layout.click_log().is_some_and(|c| c.is_empty()));
    let (x, y) = shown.layout.figure().frame_to_data(0.5, 0.5);
    let clicks = shown.layout.click_log_mut().unwrap();
    clicks.record(x, y);
    assert_eq!(clicks.text(), "[1.5000, 1.0000], ");
    assert_eq!(clicks.width, 200);
}

#[test]
fn figure_layout_has_no_click_log() {
    let mut shown = imshow(&ramp(), &ImshowParams::default()).unwrap();
    assert!(shown.layout.click_log().is_none());
    assert!(shown.layout.click_log_mut().is_none());
}
