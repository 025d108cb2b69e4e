//! Bindings to the part of [Matplotlib][]'s explicit API the sketch uses.
//!
//! The interface stays close to Matplotlib's `Figure`/`Axes` objects
//! while keeping a Rust flavor: options are typed builders and every
//! call reports Python exceptions as [`Error`].
//!
//! Figures are created through `matplotlib.figure.Figure` on the `Agg`
//! backend, so nothing is registered with pyplot and no window opens.
//!
//! [Matplotlib]: https://matplotlib.org/

use lazy_static::lazy_static;
use numpy::PyArray1;
use pyo3::{
    prelude::*,
    types::{PyBytes, PyDict, PyList},
};

use crate::error::Error;

/// Call the method `$m` of the Python object `$obj`.
macro_rules! meth {
    ($obj: expr, $m: ident, $py: ident -> $args: expr, $kwargs: expr) => {
        Python::with_gil(|$py| -> Result<(), Error> {
            let kwargs = $kwargs;
            $obj.bind($py).call_method(stringify!($m), $args, Some(&kwargs))?;
            Ok(())
        })
    };
    ($obj: expr, $m: ident, $args: expr) => {
        Python::with_gil(|py| -> Result<(), Error> {
            $obj.bind(py).call_method1(stringify!($m), $args)?;
            Ok(())
        })
    };
}

/// Build a keyword dictionary.  Must be used where `?` can propagate a
/// `PyErr`.
macro_rules! kwargs {
    ($py: ident, $($k: literal => $v: expr),* $(,)?) => {{
        let d = PyDict::new_bound($py);
        $( d.set_item($k, $v)?; )*
        d
    }};
}

/// Python modules needed by the bindings.
struct Modules {
    figure: Py<PyModule>,
    lines: Py<PyModule>,
    io: Py<PyModule>,
}

lazy_static! {
    static ref MODULES: Result<Modules, PyErr> = Python::with_gil(|py| {
        let mpl = PyModule::import_bound(py, "matplotlib")?;
        mpl.call_method1("use", ("Agg",))?;
        Ok(Modules {
            figure: PyModule::import_bound(py, "matplotlib.figure")?.unbind(),
            lines: PyModule::import_bound(py, "matplotlib.lines")?.unbind(),
            io: PyModule::import_bound(py, "io")?.unbind(),
        })
    });
}

/// Return a handle to the imported modules.
/// ⚠ This may try to lock Python's GIL.  Make sure it is executed
/// outside a call to `Python::with_gil`.
macro_rules! pymod { ($m: ident) => {
    $m.as_ref().map_err(|_| Error::NoMatplotlib)
}}

/// Check that Matplotlib can be imported.
pub fn available() -> bool {
    pymod!(MODULES).is_ok()
}

/// Trait expressing that `Self` can be converted to a numpy.ndarray.
pub trait Data {
    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>>;
}

impl<T> Data for T where T: AsRef<[f64]> + ?Sized {
    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f64>> {
        PyArray1::from_slice_bound(py, self.as_ref())
    }
}

/// Build a `R × C` array whose entry `[r][c]` is `f(r, c)`.
#[inline(always)]
pub(crate) fn grid<const R: usize, const C: usize, U>(
    f: impl Fn(usize, usize) -> U) -> [[U; C]; R] {
    let mut r = 0;
    [(); R].map(|_| {
        let mut c = 0;
        let row = [(); C].map(|_| {
            let y = f(r, c);
            c += 1;
            y });
        r += 1;
        row })
}

/// Font and placement of a piece of text.
#[derive(Debug, Clone, Default)]
pub struct TextStyle<'a> {
    fontsize: Option<f64>,
    bold: bool,
    italic: bool,
    color: Option<&'a str>,
    ha: Option<&'a str>,
    va: Option<&'a str>,
    bbox: Option<BoxStyle<'a>>,
}

/// Box drawn around a text.
#[derive(Debug, Clone)]
pub struct BoxStyle<'a> {
    pub boxstyle: &'a str,
    pub facecolor: &'a str,
    pub alpha: f64,
}

impl<'a> TextStyle<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn fontsize(mut self, size: f64) -> Self {
        self.fontsize = Some(size);
        self
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    #[must_use]
    pub fn color(mut self, color: &'a str) -> Self {
        self.color = Some(color);
        self
    }

    /// Horizontal alignment ("left", "center", "right").
    #[must_use]
    pub fn ha(mut self, ha: &'a str) -> Self {
        self.ha = Some(ha);
        self
    }

    /// Vertical alignment ("top", "center", "bottom", "baseline").
    #[must_use]
    pub fn va(mut self, va: &'a str) -> Self {
        self.va = Some(va);
        self
    }

    #[must_use]
    pub fn bbox(mut self, bbox: BoxStyle<'a>) -> Self {
        self.bbox = Some(bbox);
        self
    }

    fn kwargs<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let kwargs = PyDict::new_bound(py);
        if let Some(size) = self.fontsize {
            kwargs.set_item("fontsize", size)?;
        }
        if self.bold {
            kwargs.set_item("fontweight", "bold")?;
        }
        if self.italic {
            kwargs.set_item("style", "italic")?;
        }
        if let Some(color) = self.color {
            kwargs.set_item("color", color)?;
        }
        if let Some(ha) = self.ha {
            kwargs.set_item("ha", ha)?;
        }
        if let Some(va) = self.va {
            kwargs.set_item("va", va)?;
        }
        if let Some(b) = &self.bbox {
            let bbox = kwargs!(py, "boxstyle" => b.boxstyle,
                               "facecolor" => b.facecolor,
                               "alpha" => b.alpha);
            kwargs.set_item("bbox", bbox)?;
        }
        Ok(kwargs)
    }
}

/// Placement of a figure legend.
#[derive(Debug, Clone)]
pub struct LegendOptions<'a> {
    pub loc: &'a str,
    pub ncol: usize,
    pub fontsize: f64,
    pub frameon: bool,
    pub fancybox: bool,
    pub shadow: bool,
    pub bbox_to_anchor: (f64, f64),
}

/// A legend handle showing a single marker and no line.
#[derive(Debug)]
pub struct Line2D {
    line2d: PyObject,
}

impl Line2D {
    /// Equivalent of `Line2D([0], [0], marker=marker, color="w", ...)`.
    pub fn marker(label: &str, marker: &str, color: &str, size: f64,
                  edgecolor: &str, edgewidth: f64) -> Result<Line2D, Error> {
        let modules = pymod!(MODULES)?;
        Python::with_gil(|py| {
            let kwargs = kwargs!(py,
                "marker" => marker,
                "color" => "w",
                "markerfacecolor" => color,
                "markersize" => size,
                "markeredgecolor" => edgecolor,
                "markeredgewidth" => edgewidth,
                "label" => label);
            let line2d = modules.lines.bind(py).getattr("Line2D")?
                .call((vec![0.], vec![0.]), Some(&kwargs))?;
            Ok(Line2D { line2d: line2d.unbind() })
        })
    }
}

#[derive(Debug, Clone)]
pub struct Axes {
    ax: PyObject,
}

/// The top level container for all the plot elements.
#[derive(Debug)]
pub struct Figure {
    fig: PyObject, // instance of matplotlib.figure.Figure
}

impl Figure {
    /// Return a new `Figure` of `figsize` inches.
    ///
    /// Return an error if Matplotlib is not present on the system.
    pub fn new(figsize: (f64, f64)) -> Result<Figure, Error> {
        let modules = pymod!(MODULES)?;
        Python::with_gil(|py| {
            let kwargs = kwargs!(py, "figsize" => figsize);
            let fig = modules.figure.bind(py).getattr("Figure")?
                .call((), Some(&kwargs))?;
            Ok(Figure { fig: fig.unbind() })
        })
    }

    /// Add a `R × C` grid of axes to the figure.
    pub fn subplots<const R: usize, const C: usize>(
        &self) -> Result<[[Axes; C]; R], Error> {
        Python::with_gil(|py| {
            let kwargs = kwargs!(py, "squeeze" => false);
            let axs = self.fig.bind(py)
                .call_method("subplots", (R, C), Some(&kwargs))?;
            // Row-major, always R * C long since `squeeze=False`.
            let flat = axs.call_method0("ravel")?
                .iter()?
                .map(|ax| ax.map(Bound::unbind))
                .collect::<PyResult<Vec<PyObject>>>()?;
            Ok(grid(|r, c| Axes { ax: flat[r * C + c].clone_ref(py) }))
        })
    }

    /// Centered title above the whole figure, at height `y` (in figure
    /// coordinates).
    pub fn suptitle(&self, t: &str, y: f64, style: &TextStyle)
                    -> Result<&Self, Error> {
        meth!(self.fig, suptitle, py -> (t,), {
            let kwargs = style.kwargs(py)?;
            kwargs.set_item("y", y)?;
            kwargs })?;
        Ok(self)
    }

    /// Text at (`x`, `y`) in figure coordinates.
    pub fn text(&self, x: f64, y: f64, s: &str, style: &TextStyle)
                -> Result<&Self, Error> {
        meth!(self.fig, text, py -> (x, y, s), style.kwargs(py)?)?;
        Ok(self)
    }

    /// One legend for the whole figure.
    pub fn legend(&self, handles: &[Line2D], opt: &LegendOptions)
                  -> Result<&Self, Error> {
        meth!(self.fig, legend, py -> (), {
            let handles = PyList::new_bound(
                py, handles.iter().map(|h| h.line2d.clone_ref(py)));
            kwargs!(py,
                "handles" => handles,
                "loc" => opt.loc,
                "ncol" => opt.ncol,
                "fontsize" => opt.fontsize,
                "frameon" => opt.frameon,
                "fancybox" => opt.fancybox,
                "shadow" => opt.shadow,
                "bbox_to_anchor" => opt.bbox_to_anchor) })?;
        Ok(self)
    }

    /// Adjust the padding between and around subplots so they fit in
    /// `rect = [left, bottom, right, top]`.
    pub fn tight_layout(&self, rect: [f64; 4]) -> Result<&Self, Error> {
        meth!(self.fig, tight_layout, py -> (),
              kwargs!(py, "rect" => rect.to_vec()))?;
        Ok(self)
    }

    /// The axes of the figure, in the order they were added (row-major
    /// for [`Figure::subplots`]).
    pub fn axes(&self) -> Result<Vec<Axes>, Error> {
        Python::with_gil(|py| {
            self.fig.bind(py).getattr("axes")?.iter()?
                .map(|ax| Ok(Axes { ax: ax?.unbind() }))
                .collect()
        })
    }

    /// Entry labels of each figure legend.
    pub fn legend_labels(&self) -> Result<Vec<Vec<String>>, Error> {
        Python::with_gil(|py| {
            let mut legends = vec![];
            for leg in self.fig.bind(py).getattr("legends")?.iter()? {
                let mut labels = vec![];
                for t in leg?.call_method0("get_texts")?.iter()? {
                    labels.push(t?.call_method0("get_text")?.extract()?);
                }
                legends.push(labels);
            }
            Ok(legends)
        })
    }

    /// Text and font size of every figure-level text, the suptitle included.
    pub fn texts(&self) -> Result<Vec<(String, f64)>, Error> {
        Python::with_gil(|py| {
            self.fig.bind(py).getattr("texts")?.iter()?
                .map(|t| {
                    let t = t?;
                    Ok((t.call_method0("get_text")?.extract()?,
                        t.call_method0("get_fontsize")?.extract()?))
                })
                .collect()
        })
    }

    pub fn save(&self) -> Savefig {
        Savefig { fig: self.fig.clone(), dpi: None, tight: false,
                  facecolor: None, edgecolor: None }
    }
}

/// Options of `savefig`.
pub struct Savefig {
    fig: PyObject,
    dpi: Option<f64>,
    tight: bool,
    facecolor: Option<String>,
    edgecolor: Option<String>,
}

impl Savefig {
    pub fn dpi(&mut self, dpi: f64) -> &mut Self {
        if dpi > 0. {
            self.dpi = Some(dpi);
        } else {
            self.dpi = None;
        }
        self
    }

    /// Crop the image to the drawn elements (`bbox_inches="tight"`).
    pub fn tight(&mut self) -> &mut Self {
        self.tight = true;
        self
    }

    pub fn facecolor(&mut self, color: &str) -> &mut Self {
        self.facecolor = Some(color.to_string());
        self
    }

    pub fn edgecolor(&mut self, color: &str) -> &mut Self {
        self.edgecolor = Some(color.to_string());
        self
    }

    fn kwargs<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let kwargs = PyDict::new_bound(py);
        if let Some(dpi) = self.dpi {
            kwargs.set_item("dpi", dpi)?;
        }
        if self.tight {
            kwargs.set_item("bbox_inches", "tight")?;
        }
        if let Some(c) = &self.facecolor {
            kwargs.set_item("facecolor", c)?;
        }
        if let Some(c) = &self.edgecolor {
            kwargs.set_item("edgecolor", c)?;
        }
        Ok(kwargs)
    }

    /// Save the figure, the format being deduced from the extension.
    pub fn to_file(&self, path: impl AsRef<std::path::Path>) -> Result<(), Error> {
        Python::with_gil(|py| -> Result<(), Error> {
            let kwargs = self.kwargs(py)?;
            self.fig.bind(py)
                .call_method("savefig", (path.as_ref(),), Some(&kwargs))?;
            Ok(())
        })
    }

    /// Encode the figure in `format` ("png", "jpg", "svg",...) and
    /// return the bytes.
    pub fn to_bytes(&self, format: &str) -> Result<Vec<u8>, Error> {
        let modules = pymod!(MODULES)?;
        Python::with_gil(|py| {
            let buf = modules.io.bind(py).getattr("BytesIO")?.call0()?;
            let kwargs = self.kwargs(py)?;
            kwargs.set_item("format", format)?;
            self.fig.bind(py)
                .call_method("savefig", (buf.clone(),), Some(&kwargs))?;
            let bytes = buf.call_method0("getvalue")?
                .downcast_into::<PyBytes>()
                .map_err(PyErr::from)?;
            Ok(bytes.as_bytes().to_vec())
        })
    }
}

impl Axes {
    /// Scatter `y` versus `x`.  Options are set on the returned
    /// [`Scatter`] and applied by [`Scatter::plot`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// use splom_sketch::matplotlib::Figure;
    /// let fig = Figure::new((4., 4.))?;
    /// let [[mut ax]] = fig.subplots()?;
    /// ax.scatter(&[1., 2.], &[3., 1.]).color("#e74c3c").marker("s").plot()?;
    /// fig.save().to_file("target/scatter.png")?;
    /// # Ok::<(), splom_sketch::Error>(())
    /// ```
    #[must_use]
    pub fn scatter<'a, D>(&'a mut self, x: &'a D, y: &'a D) -> Scatter<'a, D>
    where D: Data + ?Sized {
        // Mutably borrow `self` to reflect that the final `.plot()`
        // will mutate the underlying Python object.
        Scatter { axes: self, x, y, options: ScatterOptions::default() }
    }

    /// Text at (`x`, `y`) in data coordinates.
    pub fn text(&mut self, x: f64, y: f64, s: &str, style: &TextStyle)
                -> Result<&mut Self, Error> {
        meth!(self.ax, text, py -> (x, y, s), style.kwargs(py)?)?;
        Ok(self)
    }

    pub fn set_xlim(&mut self, left: f64, right: f64) -> Result<&mut Self, Error> {
        meth!(self.ax, set_xlim, (left, right))?;
        Ok(self)
    }

    pub fn set_ylim(&mut self, bottom: f64, top: f64) -> Result<&mut Self, Error> {
        meth!(self.ax, set_ylim, (bottom, top))?;
        Ok(self)
    }

    /// Hide the axis lines, ticks and labels.
    pub fn axis_off(&mut self) -> Result<&mut Self, Error> {
        meth!(self.ax, axis, ("off",))?;
        Ok(self)
    }

    /// Show grid lines with the given `alpha` and `linestyle` ("--", ":",...).
    pub fn grid(&mut self, alpha: f64, linestyle: &str) -> Result<&mut Self, Error> {
        meth!(self.ax, grid, py -> (true,),
              kwargs!(py, "alpha" => alpha, "linestyle" => linestyle))?;
        Ok(self)
    }

    /// Draw ticks and grid lines below the data.
    pub fn set_axisbelow(&mut self, b: bool) -> Result<&mut Self, Error> {
        meth!(self.ax, set_axisbelow, (b,))?;
        Ok(self)
    }

    pub fn set_xlabel(&mut self, label: &str, style: &TextStyle)
                      -> Result<&mut Self, Error> {
        meth!(self.ax, set_xlabel, py -> (label,), style.kwargs(py)?)?;
        Ok(self)
    }

    pub fn set_ylabel(&mut self, label: &str, style: &TextStyle)
                      -> Result<&mut Self, Error> {
        meth!(self.ax, set_ylabel, py -> (label,), style.kwargs(py)?)?;
        Ok(self)
    }

    /// Set the line width of the four spines.
    pub fn set_spines_linewidth(&mut self, w: f64) -> Result<&mut Self, Error> {
        Python::with_gil(|py| -> Result<(), Error> {
            let spines = self.ax.bind(py).getattr("spines")?;
            for side in ["top", "right", "bottom", "left"] {
                spines.get_item(side)?.call_method1("set_linewidth", (w,))?;
            }
            Ok(())
        })?;
        Ok(self)
    }

    /// Number of collections (scatter plots,...) drawn on these axes.
    pub fn collections_len(&self) -> Result<usize, Error> {
        Python::with_gil(|py| {
            Ok(self.ax.bind(py).getattr("collections")?.len()?)
        })
    }

    /// Whether the axis lines and labels are drawn.
    pub fn axison(&self) -> Result<bool, Error> {
        Python::with_gil(|py| {
            Ok(self.ax.bind(py).getattr("axison")?.extract()?)
        })
    }

    pub fn xlabel(&self) -> Result<String, Error> {
        Python::with_gil(|py| {
            Ok(self.ax.bind(py).call_method0("get_xlabel")?.extract()?)
        })
    }

    pub fn ylabel(&self) -> Result<String, Error> {
        Python::with_gil(|py| {
            Ok(self.ax.bind(py).call_method0("get_ylabel")?.extract()?)
        })
    }
}

#[derive(Clone, Default)]
struct ScatterOptions<'a> {
    color: Option<&'a str>,
    marker: Option<&'a str>,
    size: Option<f64>,
    alpha: Option<f64>,
    edgecolors: Option<&'a str>,
    linewidth: Option<f64>,
}

impl<'a> ScatterOptions<'a> {
    fn kwargs<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let kwargs = PyDict::new_bound(py);
        if let Some(c) = self.color {
            kwargs.set_item("c", c)?;
        }
        if let Some(m) = self.marker {
            kwargs.set_item("marker", m)?;
        }
        if let Some(s) = self.size {
            kwargs.set_item("s", s)?;
        }
        if let Some(a) = self.alpha {
            kwargs.set_item("alpha", a)?;
        }
        if let Some(e) = self.edgecolors {
            kwargs.set_item("edgecolors", e)?;
        }
        if let Some(w) = self.linewidth {
            kwargs.set_item("linewidth", w)?;
        }
        Ok(kwargs)
    }
}

pub struct Scatter<'a, D>
where D: ?Sized {
    axes: &'a Axes,
    x: &'a D,
    y: &'a D,
    options: ScatterOptions<'a>,
}

impl<'a, D> Scatter<'a, D>
where D: Data + ?Sized {
    #[must_use]
    pub fn color(mut self, color: &'a str) -> Self {
        self.options.color = Some(color);
        self
    }

    /// Marker code ("o", "s", "^",...).
    #[must_use]
    pub fn marker(mut self, marker: &'a str) -> Self {
        self.options.marker = Some(marker);
        self
    }

    /// Marker area in points².
    #[must_use]
    pub fn size(mut self, s: f64) -> Self {
        self.options.size = Some(s);
        self
    }

    #[must_use]
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.options.alpha = Some(alpha);
        self
    }

    #[must_use]
    pub fn edgecolors(mut self, color: &'a str) -> Self {
        self.options.edgecolors = Some(color);
        self
    }

    #[must_use]
    pub fn linewidth(mut self, w: f64) -> Self {
        self.options.linewidth = Some(w);
        self
    }

    /// Plot the data with the options specified in [`Scatter`].
    pub fn plot(self) -> Result<(), Error> {
        Python::with_gil(|py| -> Result<(), Error> {
            let kwargs = self.options.kwargs(py)?;
            let xn = self.x.to_numpy(py);
            let yn = self.y.to_numpy(py);
            self.axes.ax.bind(py)
                .call_method("scatter", (xn, yn), Some(&kwargs))?;
            Ok(())
        })
    }
}
