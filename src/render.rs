//! Drawing a [`Splom`] with Matplotlib and writing the images.

use std::fs;

use tracing::{info, warn};

use crate::{
    config::{OutputTarget, SketchConfig},
    data::Dataset,
    error::Error,
    matplotlib::{Axes, BoxStyle, Figure, LegendOptions, Line2D, TextStyle},
    splom::{Panel, PanelKind, Splom, SIZE},
};

/// Draw the whole sketch: panels, title, caption and legend.
pub fn draw(splom: &Splom, dataset: &Dataset, config: &SketchConfig)
            -> Result<Figure, Error> {
    let fig = Figure::new(config.figsize)?;
    fig.suptitle(&config.title, 0.995,
                 &TextStyle::new().fontsize(16.).bold())?;

    let mut axes: [[Axes; SIZE]; SIZE] = fig.subplots()?;
    for panel in splom.panels() {
        draw_panel(&mut axes[panel.row][panel.col], panel, config)?;
    }

    let style = &config.style;
    let handles = dataset.names().iter().enumerate()
        .map(|(k, name)| Line2D::marker(
            name, style.markers[k].code(), style.colors[k],
            style.legend_marker_size, style.edge_color, style.edge_width))
        .collect::<Result<Vec<_>, _>>()?;
    fig.legend(&handles, &LegendOptions {
        loc: "lower center",
        ncol: handles.len(),
        fontsize: style.legend_fontsize,
        frameon: true,
        fancybox: true,
        shadow: true,
        bbox_to_anchor: (0.5, -0.02),
    })?;

    fig.text(0.5, 0.96, &config.caption,
             &TextStyle::new().ha("center").fontsize(style.caption_fontsize)
                 .italic().color(style.caption_color))?;
    fig.tight_layout([0., 0.02, 1., 0.98])?;
    Ok(fig)
}

fn draw_panel(ax: &mut Axes, panel: &Panel, config: &SketchConfig)
              -> Result<(), Error> {
    let style = &config.style;
    match &panel.kind {
        PanelKind::Label(attribute) => {
            let label = TextStyle::new()
                .ha("center").va("center")
                .fontsize(style.label_fontsize).bold()
                .bbox(BoxStyle { boxstyle: "round",
                                 facecolor: style.label_face,
                                 alpha: style.label_alpha });
            ax.text(0.5, 0.5, attribute.label(), &label)?
                .set_xlim(0., 1.)?
                .set_ylim(0., 1.)?
                .axis_off()?;
        }
        PanelKind::Scatter(points) => {
            for p in points {
                ax.scatter(&[p.x], &[p.y])
                    .color(style.colors[p.record])
                    .marker(style.markers[p.record].code())
                    .size(style.point_size)
                    .alpha(style.point_alpha)
                    .edgecolors(style.edge_color)
                    .linewidth(style.edge_width)
                    .plot()?;
            }
            ax.grid(style.grid_alpha, "--")?.set_axisbelow(true)?;
            let axis_label = TextStyle::new().fontsize(style.axis_fontsize).bold();
            ax.set_ylabel(panel.y_label().unwrap_or(""), &axis_label)?
                .set_xlabel(panel.x_label().unwrap_or(""), &axis_label)?
                .set_spines_linewidth(style.spine_width)?;
        }
    }
    Ok(())
}

/// Encode `fig` once per output target.  Nothing is written to disk.
pub fn encode(fig: &Figure, config: &SketchConfig)
              -> Result<Vec<(OutputTarget, Vec<u8>)>, Error> {
    let mut save = fig.save();
    save.dpi(config.dpi).tight().facecolor("white").edgecolor("none");
    config.outputs.iter()
        .map(|out| -> Result<_, Error> {
            Ok((out.clone(), save.to_bytes(out.format.as_str())?))
        })
        .collect()
}

/// Write every encoded image.  If one write fails, the files already
/// written are removed so that either all images exist or none.
pub fn save_all(images: &[(OutputTarget, Vec<u8>)])
                -> Result<Vec<OutputTarget>, Error> {
    let mut written: Vec<OutputTarget> = Vec::with_capacity(images.len());
    for (out, bytes) in images {
        if let Err(e) = fs::write(&out.path, bytes) {
            for done in &written {
                if let Err(rm) = fs::remove_file(&done.path) {
                    warn!(path = %done.path.display(), error = %rm,
                          "cannot remove partially written sketch");
                }
            }
            return Err(e.into());
        }
        info!(path = %out.path.display(), bytes = bytes.len(), "sketch written");
        written.push(out.clone());
    }
    Ok(written)
}
