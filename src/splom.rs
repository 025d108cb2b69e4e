//! Layout of the scatterplot matrix, independent of any drawing backend.

use crate::{
    data::{Attribute, AttributeSet, Dataset},
    matplotlib::grid,
};

/// Number of rows (and columns) of the matrix.
pub const SIZE: usize = 3;

/// One record plotted in a panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Index of the record, which also selects its colour and marker.
    pub record: usize,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelKind {
    /// Diagonal cell: the name of the attribute.
    Label(Attribute),
    /// Off-diagonal cell: every record, column attribute against row
    /// attribute.
    Scatter(Vec<Point>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub row: usize,
    pub col: usize,
    /// Attribute of the horizontal axis.
    pub x: Attribute,
    /// Attribute of the vertical axis.
    pub y: Attribute,
    pub kind: PanelKind,
}

impl Panel {
    pub fn is_diagonal(&self) -> bool {
        self.row == self.col
    }

    pub fn points(&self) -> &[Point] {
        match &self.kind {
            PanelKind::Label(_) => &[],
            PanelKind::Scatter(points) => points,
        }
    }

    /// Vertical axis label, only along the leftmost column.
    pub fn y_label(&self) -> Option<&'static str> {
        (!self.is_diagonal() && self.col == 0).then(|| self.y.label())
    }

    /// Horizontal axis label, only along the bottom row.
    pub fn x_label(&self) -> Option<&'static str> {
        (!self.is_diagonal() && self.row == SIZE - 1).then(|| self.x.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Splom {
    panels: [[Panel; SIZE]; SIZE],
}

impl Splom {
    /// Lay out `dataset` over `attributes`.
    pub fn build(dataset: &Dataset, attributes: &AttributeSet) -> Splom {
        let m = dataset.matrix(attributes);
        let panels = grid(|row, col| {
            let kind = if row == col {
                PanelKind::Label(attributes[row])
            } else {
                let points = m.column(col).iter().zip(m.column(row).iter())
                    .enumerate()
                    .map(|(record, (&x, &y))| Point { record, x, y })
                    .collect();
                PanelKind::Scatter(points)
            };
            Panel { row, col, x: attributes[col], y: attributes[row], kind }
        });
        Splom { panels }
    }

    pub fn panel(&self, row: usize, col: usize) -> &Panel {
        &self.panels[row][col]
    }

    /// Panels in row-major order.
    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.panels.iter().flatten()
    }
}
