use crate::color::Color;
use crate::geom;
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Degrees spanned by one percentage point of a full circle.
pub const DEG_PER_PERCENT: f64 = 3.6;

/// The percentage budget a single chart may allocate.
pub const FULL_BUDGET: f64 = 100.0;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct Label(String);

crate::impl_string_newtype!(Label);

/// One pending entry of a chart, before angles are allocated.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceInput {
    pub value: f64,
    pub label: Label,
    /// Explicit color; `None` gets a generated one at allocation time.
    pub color: Option<Color>,
}

impl SliceInput {
    pub fn new(value: f64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: Label::new(label),
            color: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// One allocated wedge. Angles are degrees; `[start_angle, end_angle)` is
/// half-open, so a boundary angle belongs to the slice *starting* there.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub index: usize,
    pub value: f64,
    pub label: Label,
    pub color: Color,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Slice {
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    pub fn midpoint(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }

    pub fn contains(&self, angle_degrees: f64) -> bool {
        self.start_angle <= angle_degrees && angle_degrees < self.end_angle
    }

    /// Legend caption, e.g. `rent: 25%`.
    pub fn caption(&self) -> String {
        format!("{}: {}%", self.label, self.value)
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    #[error("adding {value}% to the current {total}% would exceed the 100% budget")]
    OutOfBudget { total: f64, value: f64 },
}

/// The ordered, append-only slice collection for one chart, plus the running
/// percentage total. Rebuilt wholesale whenever the inputs change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SliceSet {
    slices: Vec<Slice>,
    total: f64,
}

/// What [`SliceSet::build_from`] managed to do with its inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildResult {
    pub set: SliceSet,
    /// How many inputs made it in, in order, before the budget ran out.
    pub consumed: usize,
    pub rejected: Option<LayoutError>,
}

impl SliceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slice> {
        self.slices.get(index)
    }

    /// Appends one slice after the current total.
    ///
    /// A negative `value` is flipped positive rather than rejected; the chart
    /// should stay usable on sloppy input. Exceeding the 100% budget is the
    /// one real failure: the set is left untouched and the caller decides
    /// what to tell the user. No clamping here.
    pub fn append(
        &mut self,
        value: f64,
        label: Label,
        color: Option<Color>,
    ) -> Result<&Slice, LayoutError> {
        let value = if value < 0.0 {
            log::warn!("negative value {value} for '{label}' flipped positive");
            -value
        } else {
            value
        };

        if self.total + value > FULL_BUDGET {
            return Err(LayoutError::OutOfBudget {
                total: self.total,
                value,
            });
        }

        let index = self.slices.len();
        let color = color.unwrap_or_else(|| Color::for_index(index));
        self.slices.push(Slice {
            index,
            value,
            label,
            color,
            start_angle: self.total * DEG_PER_PERCENT,
            end_angle: (self.total + value) * DEG_PER_PERCENT,
        });
        self.total += value;

        Ok(&self.slices[index])
    }

    pub fn append_input(&mut self, input: SliceInput) -> Result<&Slice, LayoutError> {
        self.append(input.value, input.label, input.color)
    }

    /// Builds a set from inputs in order, stopping at the first slice that
    /// would blow the budget. Earlier slices are kept; the report says how
    /// far it got.
    pub fn build_from<I>(inputs: I) -> BuildResult
    where
        I: IntoIterator<Item = SliceInput>,
    {
        let mut set = Self::new();
        let mut consumed = 0;

        for input in inputs {
            match set.append_input(input) {
                Ok(_) => consumed += 1,
                Err(e) => {
                    return BuildResult {
                        set,
                        consumed,
                        rejected: Some(e),
                    };
                }
            }
        }

        BuildResult {
            set,
            consumed,
            rejected: None,
        }
    }

    /// Index of the slice containing `angle_degrees` (any angle; it is
    /// normalized into [0, 360) first). `None` in the unallocated remainder.
    ///
    /// Linear scan: slice counts are tens at most, and this runs on every
    /// pointer-move, so no allocation either.
    pub fn hit_test(&self, angle_degrees: f64) -> Option<usize> {
        let angle = geom::normalize_degrees(angle_degrees);
        self.slices.iter().position(|s| s.contains(angle))
    }

    /// [`hit_test`](Self::hit_test) for a pointer position and wheel center.
    pub fn hit_test_point(&self, center: geom::Point, p: geom::Point) -> Option<usize> {
        self.hit_test(geom::point_to_angle(center, p))
    }
}
