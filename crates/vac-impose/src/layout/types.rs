//! Layout data types for imposition
//!
//! These types represent the plan produced by the layout planner: which
//! source page goes in which half of which output page, and whether it is
//! drawn upside down. They carry no geometry and no PDF objects.

use crate::constants::{FACES_PER_SHEET, SLOTS_PER_FACE};
use crate::types::PrintMode;

/// Which physical side of the printed sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    /// Front of the sheet (printed first in duplex)
    Recto,
    /// Back of the sheet (printed second in duplex)
    Verso,
}

/// One of the two half-width areas of an output face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Left,
    Right,
}

impl Slot {
    /// Rectangle covered by this slot on a sheet of the given size
    pub fn bounds(self, sheet_width: f32, sheet_height: f32) -> Rect {
        let half = sheet_width / 2.0;
        match self {
            Slot::Left => Rect::new(0.0, 0.0, half, sheet_height),
            Slot::Right => Rect::new(half, 0.0, half, sheet_height),
        }
    }
}

/// What is drawn in one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlotAssignment {
    /// Source page index (None = blank)
    pub source_page: Option<usize>,
    /// Whether the page is drawn rotated 180°
    pub rotated: bool,
}

impl SlotAssignment {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn page(index: usize, rotated: bool) -> Self {
        Self {
            source_page: Some(index),
            rotated,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.source_page.is_none()
    }
}

/// Slot assignments for one output page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceLayout {
    pub face: Face,
    pub left: SlotAssignment,
    pub right: SlotAssignment,
}

impl FaceLayout {
    /// Both slots paired with their position, left first
    pub fn slots(&self) -> [(Slot, SlotAssignment); SLOTS_PER_FACE] {
        [(Slot::Left, self.left), (Slot::Right, self.right)]
    }

    pub fn is_blank(&self) -> bool {
        self.left.is_blank() && self.right.is_blank()
    }
}

/// One physical sheet of paper: the recto page and, when present, the verso
/// page printed on its back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sheet<'a> {
    pub recto: &'a FaceLayout,
    pub verso: Option<&'a FaceLayout>,
}

/// Ordered output pages for one conversion
///
/// Faces are stored in output order. Consecutive pairs form a physical
/// sheet: page `2k` is printed on the front, page `2k + 1` on the back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan {
    pub mode: PrintMode,
    pub faces: Vec<FaceLayout>,
}

impl LayoutPlan {
    /// Number of output pages
    pub fn page_count(&self) -> usize {
        self.faces.len()
    }

    /// Number of physical sheets
    pub fn sheet_count(&self) -> usize {
        self.faces.len().div_ceil(FACES_PER_SHEET)
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Iterate the physical sheets in print order
    pub fn sheets(&self) -> impl Iterator<Item = Sheet<'_>> {
        self.faces.chunks(FACES_PER_SHEET).map(|pair| Sheet {
            recto: &pair[0],
            verso: pair.get(1),
        })
    }

    /// Every placed source index, in output order (duplicates included)
    pub fn placed_pages(&self) -> impl Iterator<Item = usize> + '_ {
        self.faces
            .iter()
            .flat_map(|f| f.slots())
            .filter_map(|(_, a)| a.source_page)
    }
}

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Center x coordinate
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Center y coordinate
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }
}
