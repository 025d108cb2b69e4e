//! Fixed settings of the sketch.
//!
//! There is no configuration file and no command line: [`SketchConfig::default`]
//! is what the binary runs with.  The `with_*` methods only redirect I/O.

use std::path::{Path, PathBuf};

use crate::data::AttributeSet;

/// Marker shapes, one per record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Circle,
    Square,
    Triangle,
}

impl Marker {
    /// Matplotlib marker code.
    pub fn code(self) -> &'static str {
        match self {
            Marker::Circle => "o",
            Marker::Square => "s",
            Marker::Triangle => "^",
        }
    }
}

/// Visual constants shared by every panel and the legend.
#[derive(Debug, Clone)]
pub struct Style {
    /// Colour of record `k`.  Red, blue, green.
    pub colors: [&'static str; 3],
    /// Marker of record `k`.
    pub markers: [Marker; 3],
    pub point_size: f64,
    pub point_alpha: f64,
    pub edge_color: &'static str,
    pub edge_width: f64,
    pub grid_alpha: f64,
    pub spine_width: f64,
    /// Face colour of the diagonal label box.
    pub label_face: &'static str,
    pub label_alpha: f64,
    pub label_fontsize: f64,
    pub axis_fontsize: f64,
    pub legend_marker_size: f64,
    pub legend_fontsize: f64,
    pub caption_fontsize: f64,
    pub caption_color: &'static str,
}

impl Default for Style {
    fn default() -> Self {
        Style {
            colors: ["#e74c3c", "#3498db", "#2ecc71"],
            markers: [Marker::Circle, Marker::Square, Marker::Triangle],
            point_size: 200.,
            point_alpha: 0.7,
            edge_color: "black",
            edge_width: 2.,
            grid_alpha: 0.3,
            spine_width: 2.,
            label_face: "wheat",
            label_alpha: 0.8,
            label_fontsize: 14.,
            axis_fontsize: 11.,
            legend_marker_size: 12.,
            legend_fontsize: 12.,
            caption_fontsize: 11.,
            caption_color: "#666666",
        }
    }
}

/// Image encodings understood by `savefig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    /// Value of the `format` keyword of `savefig`.
    pub fn as_str(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
        }
    }
}

/// One image file to produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub path: PathBuf,
    pub format: ImageFormat,
}

impl OutputTarget {
    pub fn new(path: impl Into<PathBuf>, format: ImageFormat) -> Self {
        OutputTarget { path: path.into(), format }
    }

    /// Line printed once the file at position `index` has been written.
    pub fn confirmation(&self, index: usize) -> String {
        let verb = if index == 0 { "saved as" } else { "also saved as" };
        format!("✓ Scatterplot matrix sketch {verb} '{}'", self.path.display())
    }
}

#[derive(Debug, Clone)]
pub struct SketchConfig {
    /// CSV table to pick the records from.
    pub data_path: PathBuf,
    /// Cars looked for in the `Name` column; only the first word counts.
    pub targets: [String; 3],
    /// Row positions used when not every target is found.
    pub fixed_rows: [usize; 3],
    pub attributes: AttributeSet,
    pub title: String,
    pub caption: String,
    /// Figure size in inches.
    pub figsize: (f64, f64),
    pub dpi: f64,
    pub style: Style,
    pub outputs: Vec<OutputTarget>,
}

impl Default for SketchConfig {
    fn default() -> Self {
        SketchConfig {
            data_path: PathBuf::from("cars.csv"),
            targets: [
                "Acura MDX".to_string(),
                "BMW M3 coupe 2dr".to_string(),
                "Toyota Prius (gas/electric)".to_string(),
            ],
            fixed_rows: [3, 42, 1],
            attributes: AttributeSet::default(),
            title: "Scatterplot Matrix (SPLOM) - Cars Dataset Example".to_string(),
            caption: "Each cell shows the relationship between two attributes \
                      for 3 selected cars"
                .to_string(),
            figsize: (12., 12.),
            dpi: 300.,
            style: Style::default(),
            outputs: vec![
                OutputTarget::new("scatterplot_matrix_sketch.png", ImageFormat::Png),
                OutputTarget::new("scatterplot_matrix_sketch.jpg", ImageFormat::Jpeg),
            ],
        }
    }
}

impl SketchConfig {
    #[must_use]
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    /// Move every output file into `dir`, keeping its file name.
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        for out in &mut self.outputs {
            if let Some(name) = out.path.file_name() {
                out.path = dir.join(name);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_outputs_are_png_then_jpeg() {
        let config = SketchConfig::default();
        let formats: Vec<_> = config.outputs.iter().map(|o| o.format).collect();
        assert_eq!(formats, [ImageFormat::Png, ImageFormat::Jpeg]);
        assert_eq!(config.outputs[0].path, Path::new("scatterplot_matrix_sketch.png"));
        assert_eq!(config.outputs[1].path, Path::new("scatterplot_matrix_sketch.jpg"));
    }

    #[test]
    fn confirmation_lines() {
        let config = SketchConfig::default();
        assert_eq!(
            config.outputs[0].confirmation(0),
            "✓ Scatterplot matrix sketch saved as 'scatterplot_matrix_sketch.png'"
        );
        assert_eq!(
            config.outputs[1].confirmation(1),
            "✓ Scatterplot matrix sketch also saved as 'scatterplot_matrix_sketch.jpg'"
        );
    }

    #[test]
    fn output_dir_keeps_file_names() {
        let config = SketchConfig::default().with_output_dir("/tmp/out");
        assert_eq!(
            config.outputs[1].path,
            Path::new("/tmp/out/scatterplot_matrix_sketch.jpg")
        );
    }

    #[test]
    fn markers_are_distinct() {
        let style = Style::default();
        let codes: Vec<_> = style.markers.iter().map(|m| m.code()).collect();
        assert_eq!(codes, ["o", "s", "^"]);
    }

    #[test]
    fn caption_size_is_independent_of_axis_labels() {
        let mut style = Style::default();
        assert_eq!(style.caption_fontsize, 11.);
        style.axis_fontsize = 20.;
        assert_eq!(style.caption_fontsize, 11.);
        assert_eq!(Style::default().caption_color, "#666666");
    }
}
