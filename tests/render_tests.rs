//! These tests drive Matplotlib.  They return early when it is not
//! installed, unless `SPLOM_REQUIRE_MATPLOTLIB` is set, in which case a
//! missing Matplotlib fails them.

use std::fs;

use splom_sketch::{
    config::ImageFormat,
    data::Dataset,
    generate,
    matplotlib::{self, Figure, TextStyle},
    render, Error, SketchConfig, Splom,
};

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";
const JPEG_MAGIC: &[u8] = &[0xff, 0xd8, 0xff];

fn skip() -> bool {
    if matplotlib::available() {
        return false
    }
    if std::env::var_os("SPLOM_REQUIRE_MATPLOTLIB").is_some() {
        panic!("matplotlib not importable and SPLOM_REQUIRE_MATPLOTLIB is set");
    }
    eprintln!("matplotlib not importable, skipping");
    true
}

/// A configuration reading nothing and writing into `dir`.
fn isolated(dir: &tempfile::TempDir) -> SketchConfig {
    SketchConfig::default()
        .with_data_path(dir.path().join("absent.csv"))
        .with_output_dir(dir.path())
}

#[test]
fn generate_writes_both_images() -> Result<(), Error> {
    if skip() { return Ok(()) }
    let dir = tempfile::tempdir().unwrap();
    let config = isolated(&dir);
    let written = generate(&config)?;
    assert_eq!(written, config.outputs);

    let png = fs::read(dir.path().join("scatterplot_matrix_sketch.png")).unwrap();
    let jpg = fs::read(dir.path().join("scatterplot_matrix_sketch.jpg")).unwrap();
    assert!(png.starts_with(PNG_MAGIC));
    assert!(jpg.starts_with(JPEG_MAGIC));
    assert_eq!(
        written[1].confirmation(1),
        format!("✓ Scatterplot matrix sketch also saved as '{}'",
                dir.path().join("scatterplot_matrix_sketch.jpg").display())
    );
    Ok(())
}

#[test]
fn rendering_is_reproducible() -> Result<(), Error> {
    if skip() { return Ok(()) }
    let config = SketchConfig::default();
    let dataset = Dataset::builtin();
    let splom = Splom::build(&dataset, &config.attributes);
    let encode = || -> Result<_, Error> {
        let fig = render::draw(&splom, &dataset, &config)?;
        render::encode(&fig, &config)
    };
    let first = encode()?;
    let second = encode()?;
    assert_eq!(first.len(), 2);
    assert_eq!(first[0].0.format, ImageFormat::Png);
    for ((_, a), (_, b)) in first.iter().zip(&second) {
        assert!(!a.is_empty());
        assert_eq!(a, b);
    }
    Ok(())
}

#[test]
fn draw_lays_out_the_matrix() -> Result<(), Error> {
    if skip() { return Ok(()) }
    let mut config = SketchConfig::default();
    config.style.axis_fontsize = 20.;
    let dataset = Dataset::builtin();
    let fig = render::draw(&Splom::build(&dataset, &config.attributes),
                           &dataset, &config)?;

    let axes = fig.axes()?;
    assert_eq!(axes.len(), 9);
    for (i, ax) in axes.iter().enumerate() {
        let (row, col) = (i / 3, i % 3);
        if row == col {
            assert!(!ax.axison()?, "({row}, {col})");
            assert_eq!(ax.collections_len()?, 0);
        } else {
            assert!(ax.axison()?, "({row}, {col})");
            assert_eq!(ax.collections_len()?, 3);
        }
        let left = col == 0 && row != col;
        let bottom = row == 2 && row != col;
        assert_eq!(!ax.ylabel()?.is_empty(), left, "y label of ({row}, {col})");
        assert_eq!(!ax.xlabel()?.is_empty(), bottom, "x label of ({row}, {col})");
    }
    assert_eq!(axes[3].ylabel()?, "City MPG");
    assert_eq!(axes[7].xlabel()?, "City MPG");

    assert_eq!(fig.legend_labels()?,
               [["Acura MDX", "BMW M3", "Toyota Prius"]]);

    let texts = fig.texts()?;
    let caption = texts.iter().find(|(t, _)| *t == config.caption)
        .expect("caption drawn");
    assert_eq!(caption.1, config.style.caption_fontsize);
    assert_ne!(caption.1, config.style.axis_fontsize);
    Ok(())
}

#[test]
fn scatter_panel_collects_one_artist_per_point() -> Result<(), Error> {
    if skip() { return Ok(()) }
    let fig = Figure::new((4., 4.))?;
    let [[mut label, mut scatter]] = fig.subplots()?;
    for (x, y) in [(17., 265.), (16., 333.), (48., 110.)] {
        scatter.scatter(&[x], &[y]).marker("s").size(200.).plot()?;
    }
    scatter.grid(0.3, "--")?.set_spines_linewidth(2.)?;
    label.text(0.5, 0.5, "City MPG", &TextStyle::new().ha("center").bold())?
        .axis_off()?;
    assert_eq!(scatter.collections_len()?, 3);
    assert_eq!(label.collections_len()?, 0);
    assert!(scatter.axison()?);
    assert!(!label.axison()?);
    Ok(())
}

#[test]
fn save_to_file_deduces_format() -> Result<(), Error> {
    if skip() { return Ok(()) }
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("one.png");
    let fig = Figure::new((2., 2.))?;
    let [[mut ax]] = fig.subplots()?;
    ax.scatter(&[1., 2.], &[2., 1.]).plot()?;
    fig.save().dpi(50.).to_file(&path)?;
    assert!(fs::read(&path).unwrap().starts_with(PNG_MAGIC));
    Ok(())
}

#[test]
fn unwritable_directory_leaves_nothing() -> Result<(), Error> {
    if skip() { return Ok(()) }
    let dir = tempfile::tempdir().unwrap();
    let mut config = isolated(&dir);
    config.outputs[1].path = dir.path().join("no/such/dir/sketch.jpg");
    let e = generate(&config).unwrap_err();
    assert!(matches!(e, Error::FileNotFoundError));
    assert!(!config.outputs[0].path.exists());
    Ok(())
}
