//! The spec: everything needed to render a book
//!
//! A spec is created from book options (one position per game), processed to
//! expand positions into diagrams, and passed on as JSON.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::error::SpecError;
use super::grouping::Grouping;
use super::id::IdError;
use super::options::{DiagramOptions, SpecOptions, TemplateOptions};
use super::position::{Position, PositionType};

/// Spec format version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpecVersion {
    #[default]
    V1,
}

/// A game to include in a book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSource {
    /// Name used to refer to the game; defaults to `sgf-{n}`
    pub alias: Option<String>,
    pub sgf: String,
}

/// Inputs for [`Spec::create`]
#[derive(Debug, Clone, Default)]
pub struct BookOptions {
    pub games: Vec<GameSource>,
    pub grouping_title: Option<String>,
    /// Type given to the root grouping
    pub position_type: Option<PositionType>,
    pub spec_options: SpecOptions,
    pub diagram_options: DiagramOptions,
    pub template_options: TemplateOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spec {
    #[serde(default)]
    pub version: SpecVersion,

    pub root_grouping: Grouping,

    /// Alias to raw SGF text
    #[serde(default)]
    pub sgf_mapping: IndexMap<String, String>,

    #[serde(default)]
    pub spec_options: SpecOptions,

    #[serde(default)]
    pub diagram_options: DiagramOptions,

    #[serde(default)]
    pub template_options: TemplateOptions,
}

impl Spec {
    pub fn new(root_grouping: Grouping, sgf_mapping: IndexMap<String, String>) -> Self {
        Self {
            version: SpecVersion::V1,
            root_grouping,
            sgf_mapping,
            spec_options: SpecOptions::default(),
            diagram_options: DiagramOptions::default(),
            template_options: TemplateOptions::default(),
        }
    }

    /// Creates an unprocessed spec with one position per game
    pub fn create(options: BookOptions) -> Result<Self, SpecError> {
        let mut root = Grouping::new();
        root.title = options.grouping_title;
        root.position_type = options.position_type;

        let mut sgf_mapping = IndexMap::new();
        for (n, game) in options.games.into_iter().enumerate() {
            let alias = game.alias.unwrap_or_else(|| format!("sgf-{}", n + 1));
            if sgf_mapping.contains_key(&alias) {
                return Err(IdError::Duplicate(alias).into());
            }
            root.add_position(Position::new(alias.clone(), alias.clone()));
            sgf_mapping.insert(alias, game.sgf);
        }

        Ok(Self {
            version: SpecVersion::V1,
            root_grouping: root,
            sgf_mapping,
            spec_options: options.spec_options,
            diagram_options: options.diagram_options,
            template_options: options.template_options,
        })
    }

    pub fn serialize_json(&self) -> Result<String, SpecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a spec from JSON.
    ///
    /// Unknown position types are configuration errors rather than JSON errors.
    pub fn deserialize_json(json: &str) -> Result<Self, SpecError> {
        serde_json::from_str(json).map_err(|e| {
            serde_json::from_str::<serde_json::Value>(json)
                .ok()
                .and_then(|value| find_unknown_position_type(&value))
                .unwrap_or(SpecError::Json(e))
        })
    }
}

/// Finds the first position type that doesn't parse, anywhere in the document
fn find_unknown_position_type(value: &serde_json::Value) -> Option<SpecError> {
    use serde_json::Value;

    match value {
        Value::Object(map) => map.iter().find_map(|(key, v)| {
            let named: Vec<&str> = match (key.as_str(), v) {
                ("positionType", Value::String(s)) => vec![s.as_str()],
                ("autoRotateCropTypes", Value::Object(types)) => {
                    types.keys().map(String::as_str).collect()
                }
                _ => Vec::new(),
            };
            named
                .into_iter()
                .find_map(|s| s.parse::<PositionType>().err())
                .or_else(|| find_unknown_position_type(v))
        }),
        Value::Array(items) => items.iter().find_map(find_unknown_position_type),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grouping::Generated;
    use crate::domain::id::IdGenType;
    use crate::domain::options::{AutoRotateCropPrefs, BookFormat, DiagramType};
    use crate::domain::position::PositionLabel;
    use crate::rules::{Corner, Side};
    use proptest::prelude::*;

    fn game(alias: Option<&str>, sgf: &str) -> GameSource {
        GameSource {
            alias: alias.map(str::to_string),
            sgf: sgf.to_string(),
        }
    }

    #[test]
    fn create_adds_one_position_per_game() {
        let spec = Spec::create(BookOptions {
            games: vec![game(Some("kogo"), "(;GM[1])"), game(None, "(;GM[1]C[x])")],
            grouping_title: Some("Book".to_string()),
            position_type: Some(PositionType::GameCommentary),
            ..Default::default()
        })
        .unwrap();

        let ids: Vec<_> = spec.root_grouping.positions.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["kogo", "sgf-2"]);
        assert_eq!(spec.sgf_mapping["sgf-2"], "(;GM[1]C[x])");
        assert_eq!(spec.root_grouping.position_type, Some(PositionType::GameCommentary));
    }

    #[test]
    fn create_rejects_duplicate_aliases() {
        let result = Spec::create(BookOptions {
            games: vec![game(Some("a"), "(;)"), game(Some("a"), "(;)")],
            ..Default::default()
        });
        assert!(matches!(result, Err(SpecError::DuplicateId(_))));
    }

    #[test]
    fn json_uses_documented_top_level_keys() {
        let spec = Spec::new(Grouping::new(), IndexMap::new());
        let value: serde_json::Value =
            serde_json::from_str(&spec.serialize_json().unwrap()).unwrap();

        for key in [
            "version",
            "rootGrouping",
            "sgfMapping",
            "specOptions",
            "diagramOptions",
            "templateOptions",
        ] {
            assert!(value.get(key).is_some(), "missing key {}", key);
        }
        assert_eq!(value["version"], "V1");
    }

    #[test]
    fn processed_spec_round_trips() {
        let mut root = Grouping::new().with_title("Problems");
        root.add_position(Position::new("p1", "game").with_position_type(PositionType::Problem));
        let mut gen = Generated::new("p1");
        gen.positions.push(
            Position::new("game-0", "game")
                .with_initial_position("0")
                .with_labels(vec![PositionLabel::ProblemRoot, PositionLabel::Problem]),
        );
        root.generated.insert("p1".to_string(), gen);

        let mut mapping = IndexMap::new();
        mapping.insert("game".to_string(), "(;GM[1];B[aa])".to_string());
        let mut spec = Spec::new(root, mapping);
        spec.diagram_options.diagram_type = Some(DiagramType::Gnos);
        spec.diagram_options
            .extra
            .insert("fontSize".to_string(), serde_json::json!(12));
        spec.template_options.authors = vec!["Honinbo Shusaku".to_string()];

        let json = spec.serialize_json().unwrap();
        assert_eq!(Spec::deserialize_json(&json).unwrap(), spec);
    }

    #[test]
    fn unknown_position_type_is_configuration_error() {
        let json = r#"{
            "rootGrouping": {
                "groupings": [{
                    "positions": [{ "id": "p", "alias": "a", "positionType": "DIAGRAM" }]
                }]
            }
        }"#;
        assert!(matches!(
            Spec::deserialize_json(json),
            Err(SpecError::Configuration(msg)) if msg.contains("DIAGRAM")
        ));

        let json = r#"{
            "rootGrouping": {},
            "specOptions": { "autoRotateCropTypes": { "KOAN": true } }
        }"#;
        assert!(matches!(
            Spec::deserialize_json(json),
            Err(SpecError::Configuration(msg)) if msg.contains("KOAN")
        ));
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(matches!(
            Spec::deserialize_json("{ \"rootGrouping\": 3 }"),
            Err(SpecError::Json(_))
        ));
    }

    fn any_position_type() -> impl Strategy<Value = PositionType> {
        prop::sample::select(vec![
            PositionType::Example,
            PositionType::GameCommentary,
            PositionType::Problem,
            PositionType::PositionVariations,
        ])
    }

    fn any_label() -> impl Strategy<Value = PositionLabel> {
        prop::sample::select(vec![
            PositionLabel::Mainline,
            PositionLabel::Variation,
            PositionLabel::Problem,
            PositionLabel::ProblemRoot,
            PositionLabel::Correct,
            PositionLabel::Incorrect,
            PositionLabel::Indeterminate,
        ])
    }

    fn any_position() -> impl Strategy<Value = Position> {
        (
            "[a-z][a-z0-9-]{0,8}",
            "[a-z]{1,6}",
            proptest::option::of("[0-9]{1,2}(\\.[0-9]){0,3}\\+?"),
            proptest::option::of("[0-9](\\.[0-9]){0,3}"),
            proptest::option::of(any_position_type()),
            prop::collection::vec(any_label(), 0..3),
        )
            .prop_map(|(id, alias, initial_position, next_moves_path, position_type, labels)| {
                Position {
                    id,
                    alias,
                    initial_position,
                    next_moves_path,
                    position_type,
                    labels,
                }
            })
    }

    fn any_generated() -> impl Strategy<Value = Generated> {
        (
            "[a-z]{1,6}",
            any_position_type(),
            prop::collection::vec(any_position(), 0..4),
        )
            .prop_map(|(id, position_type, positions)| Generated {
                id,
                position_type,
                positions,
            })
    }

    fn any_grouping() -> impl Strategy<Value = Grouping> {
        let leaf = (
            proptest::option::of("\\PC{0,12}"),
            proptest::option::of("\\PC{0,20}"),
            proptest::option::of(any_position_type()),
            prop::collection::vec(any_position(), 0..3),
            prop::collection::vec(any_generated(), 0..3),
        )
            .prop_map(|(title, description, position_type, positions, generated)| Grouping {
                title,
                description,
                position_type,
                positions,
                groupings: Vec::new(),
                generated: generated.into_iter().map(|g| (g.id.clone(), g)).collect(),
            });

        leaf.prop_recursive(3, 24, 3, |inner| {
            (inner.clone(), prop::collection::vec(inner, 0..3)).prop_map(
                |(mut grouping, children)| {
                    grouping.groupings = children;
                    grouping
                },
            )
        })
    }

    fn any_spec_options() -> impl Strategy<Value = SpecOptions> {
        let prefs = (
            prop::sample::select(vec![
                Corner::TopLeft,
                Corner::TopRight,
                Corner::BottomLeft,
                Corner::BottomRight,
            ]),
            prop::sample::select(vec![Side::Top, Side::Left, Side::Bottom, Side::Right]),
        )
            .prop_map(|(corner, side)| AutoRotateCropPrefs { corner, side });

        (
            proptest::option::of(any_position_type()),
            prop::sample::select(vec![IdGenType::Sequential, IdGenType::Path]),
            proptest::option::of(prefs),
            prop::collection::vec((any_position_type(), any::<bool>()), 0..4),
            prop::collection::vec(
                ("[A-Z]{1,2}", prop::collection::vec("\\PC{1,8}", 0..3)),
                0..3,
            ),
        )
            .prop_map(|(position_type, id_gen_type, prefs, types, conditions)| SpecOptions {
                position_type,
                id_gen_type,
                auto_rotate_crop_prefs: prefs,
                auto_rotate_crop_types: types.into_iter().collect(),
                problem_conditions: conditions.into_iter().collect(),
            })
    }

    fn any_spec() -> impl Strategy<Value = Spec> {
        let game = "\\(;GM\\[1\\](;[BW]\\[[a-s]{2}\\]){0,4}\\)";
        (
            any_grouping(),
            prop::collection::vec(("[a-z]{1,6}", game), 0..4),
            any_spec_options(),
            proptest::option::of(prop::sample::select(vec![
                DiagramType::Gnos,
                DiagramType::Svg,
                DiagramType::Ascii,
            ])),
            proptest::option::of(prop::sample::select(vec![BookFormat::Latex, BookFormat::Epub])),
            prop::collection::vec("\\PC{1,16}", 0..3),
            prop::collection::vec(("x[a-z]{1,5}", "\\PC{0,8}"), 0..3),
        )
            .prop_map(
                |(root, games, spec_options, diagram_type, format, authors, extra)| {
                    let mut spec = Spec::new(root, games.into_iter().collect());
                    spec.spec_options = spec_options;
                    spec.diagram_options.diagram_type = diagram_type;
                    spec.template_options.format = format;
                    spec.template_options.authors = authors;
                    spec.template_options.extra = extra
                        .into_iter()
                        .map(|(k, v)| (k, serde_json::Value::String(v)))
                        .collect();
                    spec
                },
            )
    }

    proptest! {
        #[test]
        fn spec_json_round_trips(spec in any_spec()) {
            let json = spec.serialize_json().unwrap();
            prop_assert_eq!(Spec::deserialize_json(&json).unwrap(), spec);
        }
    }
}
