use serde::{Deserialize, Serialize};

use super::{FlowPath, Polyline};
use crate::error::{FlowError, Result};
use glam::Vec2;

/// A vector drawing described as JSON: the canvas size plus its path elements.
///
/// This is the JSON counterpart of an SVG file whose `<path>` elements carry
/// `id`, `class` and `d` attributes. Elements may instead give explicit
/// `points`, which load without lyon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathDocument {
    /// Width of the source coordinate space.
    #[serde(default = "default_width")]
    pub width: f32,
    /// Height of the source coordinate space.
    #[serde(default = "default_height")]
    pub height: f32,
    /// Path elements in document order.
    pub paths: Vec<PathElement>,
}

/// One path element of a [`PathDocument`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathElement {
    #[serde(default)]
    pub id: String,
    /// Whitespace-separated class list, as in SVG.
    #[serde(default)]
    pub class: String,
    /// SVG path data.
    #[serde(default)]
    pub d: Option<String>,
    /// Explicit vertices, used instead of `d`.
    #[serde(default)]
    pub points: Option<Vec<[f32; 2]>>,
    /// Connect the last vertex back to the first (only for `points`).
    #[serde(default)]
    pub closed: bool,
}

fn default_width() -> f32 {
    2048.0
}

fn default_height() -> f32 {
    1024.0
}

impl PathElement {
    /// True when `class` appears in this element's class list.
    pub fn has_class(&self, class: &str) -> bool {
        self.class.split_whitespace().any(|c| c == class)
    }

    /// Build a sampleable path from this element.
    pub fn to_path(&self, index: usize) -> Result<Box<dyn FlowPath>> {
        if let Some(points) = &self.points {
            let points: Vec<Vec2> = points.iter().map(|p| Vec2::from(*p)).collect();
            let line = if self.closed {
                Polyline::closed(points)
            } else {
                Polyline::new(points)
            };
            return Ok(Box::new(line));
        }

        match &self.d {
            Some(data) => self.parse_data(data),
            None => Err(FlowError::InvalidPath {
                index,
                reason: format!("element '{}' has neither `d` nor `points`", self.id),
            }),
        }
    }

    #[cfg(feature = "vectors")]
    fn parse_data(&self, data: &str) -> Result<Box<dyn FlowPath>> {
        Ok(Box::new(super::VectorPath::from_svg_data(&self.id, data)?))
    }

    #[cfg(not(feature = "vectors"))]
    fn parse_data(&self, _data: &str) -> Result<Box<dyn FlowPath>> {
        Err(FlowError::PathData {
            id: self.id.clone(),
            message: "SVG path data needs the `vectors` feature".into(),
        })
    }
}

impl PathDocument {
    /// Parse a document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Offset that maps the document's frame onto a renderer-centered one.
    pub fn center_offset(&self) -> [f32; 2] {
        [self.width / 2.0, self.height / 2.0]
    }

    /// Elements matching `class`, in document order. `None` selects all.
    pub fn select<'a>(&'a self, class: Option<&'a str>) -> impl Iterator<Item = &'a PathElement> + 'a {
        self.paths
            .iter()
            .filter(move |el| class.map_or(true, |c| el.has_class(c)))
    }

    /// Build every selected path.
    ///
    /// Fails with [`FlowError::NoPaths`] when nothing matches, and on the
    /// first element that cannot be built; no partial list is returned.
    pub fn build_paths(&self, class: Option<&str>) -> Result<Vec<Box<dyn FlowPath>>> {
        let paths = self
            .select(class)
            .enumerate()
            .map(|(i, el)| el.to_path(i))
            .collect::<Result<Vec<_>>>()?;
        if paths.is_empty() {
            return Err(FlowError::NoPaths);
        }
        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "width": 2048,
        "height": 1024,
        "paths": [
            { "id": "a", "class": "cls-1", "points": [[0, 0], [100, 0]] },
            { "id": "b", "class": "cls-2 outline", "points": [[0, 0], [0, 50]] },
            { "id": "c", "class": "accent cls-1", "points": [[0, 0], [10, 0], [10, 10]], "closed": true }
        ]
    }"#;

    #[test]
    fn parse_document() {
        let doc = PathDocument::from_json(DOC).unwrap();
        assert_eq!(doc.paths.len(), 3);
        assert_eq!(doc.center_offset(), [1024.0, 512.0]);
    }

    #[test]
    fn class_filter_matches_whole_names() {
        let doc = PathDocument::from_json(DOC).unwrap();
        let ids: Vec<&str> = doc.select(Some("cls-1")).map(|el| el.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(doc.select(Some("cls")).count(), 0);
        assert_eq!(doc.select(None).count(), 3);
    }

    #[test]
    fn build_paths_measures_points() {
        let doc = PathDocument::from_json(DOC).unwrap();
        let paths = doc.build_paths(Some("cls-1")).unwrap();
        assert_eq!(paths.len(), 2);
        assert!((paths[0].length() - 100.0).abs() < 1e-5);
        // Closed triangle: 10 + 10 + sqrt(200)
        assert!((paths[1].length() - (20.0 + 200f32.sqrt())).abs() < 1e-4);
    }

    #[test]
    fn no_matching_paths_is_fatal() {
        let doc = PathDocument::from_json(DOC).unwrap();
        assert!(matches!(doc.build_paths(Some("missing")), Err(FlowError::NoPaths)));
    }

    #[test]
    fn element_without_geometry_is_invalid() {
        let doc = PathDocument::from_json(r#"{ "paths": [{ "id": "ghost" }] }"#).unwrap();
        assert!(matches!(doc.build_paths(None), Err(FlowError::InvalidPath { index: 0, .. })));
    }

    #[test]
    fn size_defaults_to_reference_canvas() {
        let doc = PathDocument::from_json(r#"{ "paths": [] }"#).unwrap();
        assert_eq!(doc.width, 2048.0);
        assert_eq!(doc.height, 1024.0);
    }

    #[cfg(feature = "vectors")]
    #[test]
    fn svg_data_elements_build() {
        let doc = PathDocument::from_json(
            r#"{ "paths": [{ "id": "d1", "class": "cls-1", "d": "M10 10 H 110" }] }"#,
        )
        .unwrap();
        let paths = doc.build_paths(Some("cls-1")).unwrap();
        assert!((paths[0].length() - 100.0).abs() < 0.01);
    }
}
