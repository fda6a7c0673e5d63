//! Swatch bookkeeping: roles, palette tags, and source/target pairing.

use std::collections::BTreeMap;
use std::fmt;

use crate::api::TransferError;
use crate::image::Rect;
use crate::transfer::DEFAULT_MAX_SWATCHES;

/// Default side of a swatch placed from a single corner point.
pub const DEFAULT_SWATCH_SIZE: usize = 50;

/// Names of the first palette tags, in assignment order.
pub const TAG_NAMES: [&str; 10] = [
    "red", "blue", "green", "yellow", "purple", "pink", "cyan", "orange", "black", "grey",
];

/// Which image a swatch marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwatchRole {
    /// The colorful image chrominance is taken from.
    Source,
    /// The grayscale image being colorized.
    Target,
}

impl fmt::Display for SwatchRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwatchRole::Source => write!(f, "source"),
            SwatchRole::Target => write!(f, "target"),
        }
    }
}

/// Palette index linking a source swatch to its target swatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SwatchTag(pub usize);

impl SwatchTag {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }

    /// Display name: a palette color for the first ten tags, `swatch-<n>` after.
    ///
    /// ```
    /// use color_transfer::SwatchTag;
    ///
    /// assert_eq!(SwatchTag(0).name(), "red");
    /// assert_eq!(SwatchTag(9).name(), "grey");
    /// assert_eq!(SwatchTag(10).name(), "swatch-10");
    /// ```
    pub fn name(self) -> String {
        match TAG_NAMES.get(self.0) {
            Some(name) => (*name).to_string(),
            None => format!("swatch-{}", self.0),
        }
    }
}

impl std::str::FromStr for SwatchTag {
    type Err = TransferError;

    /// Parse a tag from its display name (`red`, `grey`, `swatch-12`).
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        let name = name.trim();
        if let Some(index) = TAG_NAMES.iter().position(|n| n.eq_ignore_ascii_case(name)) {
            return Ok(SwatchTag(index));
        }
        name.strip_prefix("swatch-")
            .and_then(|n| n.parse().ok())
            .map(SwatchTag)
            .ok_or_else(|| TransferError::InvalidSwatch(format!("unknown swatch tag '{name}'")))
    }
}

impl fmt::Display for SwatchTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// A rectangular region of one image, already clipped to that image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub role: SwatchRole,
    pub bounds: Rect,
    pub tag: SwatchTag,
}

/// A source region and the target region it colorizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwatchPair {
    pub tag: SwatchTag,
    pub source: Rect,
    pub target: Rect,
}

/// Swatches of both roles in creation order.
///
/// # Example
///
/// ```
/// use color_transfer::{pair_swatches, Rect, SwatchRole, SwatchSet};
///
/// let mut set = SwatchSet::default();
/// set.add(SwatchRole::Source, Rect::new(0, 0, 10, 10), 64, 64).unwrap();
/// set.add(SwatchRole::Target, Rect::new(5, 5, 80, 80), 64, 64).unwrap();
///
/// let pairs = pair_swatches(&set).unwrap();
/// assert_eq!(pairs.len(), 1);
/// assert_eq!(pairs[0].target, Rect::new(5, 5, 64, 64));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwatchSet {
    swatches: Vec<Swatch>,
    max_per_role: usize,
}

impl Default for SwatchSet {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SWATCHES)
    }
}

impl SwatchSet {
    /// An empty set allowing `max_per_role` swatches in each role.
    pub fn new(max_per_role: usize) -> Self {
        Self {
            swatches: Vec::new(),
            max_per_role,
        }
    }

    #[inline]
    pub fn max_per_role(&self) -> usize {
        self.max_per_role
    }

    /// Change the per-role limit. Existing swatches are kept.
    pub fn set_max_per_role(&mut self, max: usize) {
        self.max_per_role = max;
    }

    /// Number of swatches marking `role`.
    pub fn count(&self, role: SwatchRole) -> usize {
        self.swatches.iter().filter(|s| s.role == role).count()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.swatches.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.swatches.is_empty()
    }

    /// All swatches in creation order.
    pub fn iter(&self) -> std::slice::Iter<'_, Swatch> {
        self.swatches.iter()
    }

    /// Swatches of one role in creation order.
    pub fn of_role(&self, role: SwatchRole) -> impl Iterator<Item = &Swatch> + '_ {
        self.swatches.iter().filter(move |s| s.role == role)
    }

    /// Add a swatch covering `rect` on an image of `image_width × image_height`.
    ///
    /// The rectangle is clipped to the image. The new swatch is tagged with
    /// the smaller of the two role counts before insertion, so alternately
    /// marking source and target regions pairs them up in order.
    ///
    /// # Errors
    ///
    /// - [`TransferError::SwatchLimit`] if `role` already holds the maximum
    /// - [`TransferError::InvalidSwatch`] if the clipped rectangle is empty
    pub fn add(
        &mut self,
        role: SwatchRole,
        rect: Rect,
        image_width: usize,
        image_height: usize,
    ) -> Result<Swatch, TransferError> {
        let sources = self.count(SwatchRole::Source);
        let targets = self.count(SwatchRole::Target);
        let existing = match role {
            SwatchRole::Source => sources,
            SwatchRole::Target => targets,
        };
        if existing >= self.max_per_role {
            return Err(TransferError::SwatchLimit {
                role,
                max: self.max_per_role,
            });
        }

        self.insert(
            role,
            rect,
            SwatchTag(sources.min(targets)),
            image_width,
            image_height,
        )
    }

    /// Add a swatch with an explicit tag instead of the creation-order one.
    ///
    /// Clipping and the per-role limit apply as for [`add`](Self::add).
    pub fn add_tagged(
        &mut self,
        role: SwatchRole,
        rect: Rect,
        tag: SwatchTag,
        image_width: usize,
        image_height: usize,
    ) -> Result<Swatch, TransferError> {
        if self.count(role) >= self.max_per_role {
            return Err(TransferError::SwatchLimit {
                role,
                max: self.max_per_role,
            });
        }
        self.insert(role, rect, tag, image_width, image_height)
    }

    fn insert(
        &mut self,
        role: SwatchRole,
        rect: Rect,
        tag: SwatchTag,
        image_width: usize,
        image_height: usize,
    ) -> Result<Swatch, TransferError> {
        let bounds = rect.clip(image_width, image_height);
        if bounds.is_empty() {
            return Err(TransferError::InvalidSwatch(format!(
                "{role} rectangle ({}, {})-({}, {}) covers no pixel of a {image_width}x{image_height} image",
                rect.x1, rect.y1, rect.x2, rect.y2
            )));
        }

        let swatch = Swatch { role, bounds, tag };
        tracing::debug!(%role, %tag, ?bounds, "added swatch");
        self.swatches.push(swatch);
        Ok(swatch)
    }

    /// Add a swatch from its top-left corner and size.
    ///
    /// See [`add`](Self::add); `width` and `height` typically default to
    /// [`DEFAULT_SWATCH_SIZE`].
    pub fn add_at(
        &mut self,
        role: SwatchRole,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        image_width: usize,
        image_height: usize,
    ) -> Result<Swatch, TransferError> {
        self.add(
            role,
            Rect::from_origin_size(x, y, width, height),
            image_width,
            image_height,
        )
    }

    /// Remove every swatch of `role`.
    pub fn clear(&mut self, role: SwatchRole) {
        self.swatches.retain(|s| s.role != role);
    }

    /// Remove all swatches.
    pub fn clear_all(&mut self) {
        self.swatches.clear();
    }
}

impl<'a> IntoIterator for &'a SwatchSet {
    type Item = &'a Swatch;
    type IntoIter = std::slice::Iter<'a, Swatch>;

    fn into_iter(self) -> Self::IntoIter {
        self.swatches.iter()
    }
}

/// Match source and target swatches by tag.
///
/// Pairs come out in ascending tag order. When a role holds several
/// swatches with the same tag, the most recently added one is used. Tags
/// present in only one role are skipped.
///
/// # Errors
///
/// - [`TransferError::NoSwatches`] if either role is empty, or no tag is
///   shared by both roles
/// - [`TransferError::SwatchCountMismatch`] if the role counts differ
pub fn pair_swatches(swatches: &SwatchSet) -> Result<Vec<SwatchPair>, TransferError> {
    let sources = swatches.count(SwatchRole::Source);
    let targets = swatches.count(SwatchRole::Target);
    if sources != targets {
        return Err(TransferError::SwatchCountMismatch { sources, targets });
    }
    if sources == 0 {
        return Err(TransferError::NoSwatches);
    }

    let mut source_by_tag = BTreeMap::new();
    let mut target_by_tag = BTreeMap::new();
    for swatch in swatches {
        let map = match swatch.role {
            SwatchRole::Source => &mut source_by_tag,
            SwatchRole::Target => &mut target_by_tag,
        };
        map.insert(swatch.tag, swatch.bounds);
    }

    let pairs: Vec<SwatchPair> = source_by_tag
        .into_iter()
        .filter_map(|(tag, source)| {
            target_by_tag
                .get(&tag)
                .map(|&target| SwatchPair {
                    tag,
                    source,
                    target,
                })
        })
        .collect();

    if pairs.is_empty() {
        return Err(TransferError::NoSwatches);
    }
    tracing::debug!(pairs = pairs.len(), "paired swatches");
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_alternating_adds_get_increasing_tags() {
        let mut set = SwatchSet::default();
        let tags: Vec<usize> = [
            SwatchRole::Source,
            SwatchRole::Target,
            SwatchRole::Source,
            SwatchRole::Target,
        ]
        .into_iter()
        .map(|role| set.add(role, Rect::new(0, 0, 4, 4), 10, 10).unwrap().tag.index())
        .collect();
        assert_eq!(tags, vec![0, 0, 1, 1]);
    }

    #[test]
    fn test_repeated_role_reuses_tag() {
        let mut set = SwatchSet::default();
        let a = set.add(SwatchRole::Source, Rect::new(0, 0, 2, 2), 10, 10).unwrap();
        let b = set.add(SwatchRole::Source, Rect::new(4, 4, 6, 6), 10, 10).unwrap();
        assert_eq!(a.tag, SwatchTag(0));
        assert_eq!(b.tag, SwatchTag(0));
    }

    #[test]
    fn test_add_clips_and_rejects_empty() {
        let mut set = SwatchSet::default();
        let s = set.add_at(SwatchRole::Target, 8, 8, 50, 50, 10, 12).unwrap();
        assert_eq!(s.bounds, Rect::new(8, 8, 10, 12));

        let err = set.add(SwatchRole::Target, Rect::new(20, 0, 30, 5), 10, 10).unwrap_err();
        assert!(matches!(err, TransferError::InvalidSwatch(_)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_limit_per_role() {
        let mut set = SwatchSet::new(2);
        for _ in 0..2 {
            set.add(SwatchRole::Source, Rect::new(0, 0, 1, 1), 4, 4).unwrap();
        }
        let err = set.add(SwatchRole::Source, Rect::new(0, 0, 1, 1), 4, 4).unwrap_err();
        assert_eq!(
            err,
            TransferError::SwatchLimit {
                role: SwatchRole::Source,
                max: 2
            }
        );
        // the other role is unaffected
        assert!(set.add(SwatchRole::Target, Rect::new(0, 0, 1, 1), 4, 4).is_ok());
    }

    #[test]
    fn test_clear_one_role() {
        let mut set = SwatchSet::default();
        set.add(SwatchRole::Source, Rect::new(0, 0, 1, 1), 4, 4).unwrap();
        set.add(SwatchRole::Target, Rect::new(0, 0, 1, 1), 4, 4).unwrap();
        set.clear(SwatchRole::Source);
        assert_eq!(set.count(SwatchRole::Source), 0);
        assert_eq!(set.count(SwatchRole::Target), 1);
    }

    #[test]
    fn test_pair_errors() {
        let mut set = SwatchSet::default();
        assert_eq!(pair_swatches(&set), Err(TransferError::NoSwatches));

        set.add(SwatchRole::Source, Rect::new(0, 0, 1, 1), 4, 4).unwrap();
        set.add(SwatchRole::Source, Rect::new(1, 1, 2, 2), 4, 4).unwrap();
        set.add(SwatchRole::Target, Rect::new(0, 0, 1, 1), 4, 4).unwrap();
        assert_eq!(
            pair_swatches(&set),
            Err(TransferError::SwatchCountMismatch {
                sources: 2,
                targets: 1
            })
        );
    }

    #[test]
    fn test_pairs_in_tag_order_last_duplicate_wins() {
        let mut set = SwatchSet::default();
        // source, source -> both tag 0; then targets get tags 0 and 1
        set.add(SwatchRole::Source, Rect::new(0, 0, 1, 1), 8, 8).unwrap();
        set.add(SwatchRole::Source, Rect::new(2, 2, 3, 3), 8, 8).unwrap();
        set.add(SwatchRole::Target, Rect::new(4, 4, 5, 5), 8, 8).unwrap();
        set.add(SwatchRole::Target, Rect::new(6, 6, 7, 7), 8, 8).unwrap();

        let pairs = pair_swatches(&set).unwrap();
        assert_eq!(
            pairs,
            vec![SwatchPair {
                tag: SwatchTag(0),
                source: Rect::new(2, 2, 3, 3),
                target: Rect::new(4, 4, 5, 5),
            }]
        );
    }

    #[test]
    fn test_explicit_tags_pair_out_of_order() {
        let mut set = SwatchSet::default();
        set.add_tagged(SwatchRole::Source, Rect::new(0, 0, 1, 1), SwatchTag(3), 8, 8)
            .unwrap();
        set.add_tagged(SwatchRole::Source, Rect::new(1, 1, 2, 2), SwatchTag(1), 8, 8)
            .unwrap();
        set.add_tagged(SwatchRole::Target, Rect::new(2, 2, 3, 3), SwatchTag(1), 8, 8)
            .unwrap();
        set.add_tagged(SwatchRole::Target, Rect::new(3, 3, 4, 4), SwatchTag(3), 8, 8)
            .unwrap();

        let tags: Vec<SwatchTag> = pair_swatches(&set).unwrap().iter().map(|p| p.tag).collect();
        assert_eq!(tags, vec![SwatchTag(1), SwatchTag(3)]);
    }

    #[test]
    fn test_tag_from_name() {
        assert_eq!("red".parse::<SwatchTag>(), Ok(SwatchTag(0)));
        assert_eq!("Grey".parse::<SwatchTag>(), Ok(SwatchTag(9)));
        assert_eq!("swatch-14".parse::<SwatchTag>(), Ok(SwatchTag(14)));
        assert!("magenta".parse::<SwatchTag>().is_err());
    }

    #[test]
    fn test_role_display() {
        assert_eq!(SwatchRole::Source.to_string(), "source");
        assert_eq!(SwatchTag(2).to_string(), "green");
    }
}
