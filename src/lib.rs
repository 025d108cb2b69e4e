//! Scatterplot-matrix sketch of three cars.
//!
//! Usage
//! -----
//!
//! [`generate`] picks three cars out of `cars.csv` (or uses built-in
//! values when the table is unusable), lays them out as a 3×3
//! scatterplot matrix and writes the figure as PNG and JPEG through
//! [Matplotlib][].
//!
//! ```no_run
//! use splom_sketch::{generate, SketchConfig};
//! for (i, out) in generate(&SketchConfig::default())?.iter().enumerate() {
//!     println!("{}", out.confirmation(i));
//! }
//! # Ok::<(), splom_sketch::Error>(())
//! ```
//!
//! [Matplotlib]: https://matplotlib.org/

use tracing::debug;

pub mod config;
pub mod data;
pub mod error;
pub mod matplotlib;
pub mod render;
pub mod splom;
pub mod telemetry;

pub use config::{OutputTarget, SketchConfig};
pub use data::{Acquisition, Dataset, Record};
pub use error::Error;
pub use splom::Splom;

/// Acquire the records, draw the matrix and write every output of
/// `config`.  Return the outputs written, in order.
///
/// Data problems never fail: they select the built-in records.  Errors
/// come from Matplotlib or from writing the files, in which case no
/// output is left behind.
pub fn generate(config: &SketchConfig) -> Result<Vec<OutputTarget>, Error> {
    let Acquisition { dataset, source } =
        data::acquire(&config.data_path, &config.targets, config.fixed_rows);
    debug!(?source, names = ?dataset.names(), "records ready");
    let splom = Splom::build(&dataset, &config.attributes);
    let fig = render::draw(&splom, &dataset, config)?;
    let images = render::encode(&fig, config)?;
    render::save_all(&images)
}

#[cfg(doctest)]
doc_comment::doctest!("../README.md");
