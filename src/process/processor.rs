//! Spec processing
//!
//! Turns a raw spec into a processed one: every position is expanded by its
//! type and the results are attached to its grouping under `generated`.
//! Examples are checked but generate nothing.

use crate::domain::{
    Generated, Grouping, IdGen, Position, PositionType, Spec, SpecError, SpecOptions,
};
use crate::rules::{InitialPath, MoveTree, Treepath};

use super::cache::MoveTreeCache;
use super::orientation::find_canonical_rotation;
use super::{game_commentary, problem};

/// One processing run over a spec
pub struct SpecProcessor<'a> {
    spec: &'a Spec,
    id_gen: IdGen,
    cache: MoveTreeCache<'a>,
}

impl<'a> SpecProcessor<'a> {
    pub fn new(spec: &'a Spec) -> Self {
        Self {
            spec,
            id_gen: IdGen::new(spec.spec_options.id_gen_type),
            cache: MoveTreeCache::new(&spec.sgf_mapping),
        }
    }

    /// Expands every position and returns the processed spec.
    ///
    /// The input spec is left as it was.
    pub fn process(mut self) -> Result<Spec, SpecError> {
        let mut root = self.spec.root_grouping.clone();
        let default_type = self.spec.spec_options.position_type;
        self.process_grouping(&mut root, default_type)?;

        tracing::info!(
            ids = self.id_gen.len(),
            games = self.spec.sgf_mapping.len(),
            "processed spec"
        );

        Ok(Spec {
            version: self.spec.version,
            root_grouping: root,
            sgf_mapping: self.spec.sgf_mapping.clone(),
            spec_options: self.spec.spec_options.clone(),
            diagram_options: self.spec.diagram_options.clone(),
            template_options: self.spec.template_options.clone(),
        })
    }

    fn process_grouping(
        &mut self,
        grouping: &mut Grouping,
        inherited: Option<PositionType>,
    ) -> Result<(), SpecError> {
        let grouping_type = grouping.position_type.or(inherited);
        tracing::debug!(
            title = grouping.title.as_deref().unwrap_or(""),
            positions = grouping.positions.len(),
            "processing grouping"
        );

        for position in &grouping.positions {
            if let Some(generated) = self.process_position(position, grouping_type)? {
                grouping.generated.insert(position.id.clone(), generated);
            }
        }

        for child in &mut grouping.groupings {
            self.process_grouping(child, grouping_type)?;
        }
        Ok(())
    }

    fn process_position(
        &mut self,
        position: &Position,
        grouping_type: Option<PositionType>,
    ) -> Result<Option<Generated>, SpecError> {
        self.id_gen.reserve(&position.id)?;

        let position_type = position.position_type.or(grouping_type).ok_or_else(|| {
            SpecError::Configuration(format!(
                "No position type for position '{}'; \
                 set one on the position, a grouping, or the spec options",
                position.id
            ))
        })?;

        position.validate()?;
        position.validate_for_type(position_type)?;
        tracing::debug!(
            id = %position.id,
            alias = %position.alias,
            %position_type,
            "processing position"
        );

        let spec = self.spec;
        let options = &spec.spec_options;
        self.rotate_if_configured(&position.alias, position_type, options)?;
        let tree = self.cache.get(&position.alias)?;

        match position_type {
            PositionType::GameCommentary => {
                game_commentary::process(tree, position, &mut self.id_gen).map(Some)
            }
            PositionType::Problem => {
                problem::process(tree, position, &mut self.id_gen, &options.problem_conditions)
                    .map(Some)
            }
            PositionType::Example => example(tree, position).map(|()| None),
            PositionType::PositionVariations => Err(SpecError::Configuration(format!(
                "Position type {} is not supported (position '{}')",
                position_type, position.id
            ))),
        }
    }

    /// Rotates the cached tree for an alias when its type is auto-rotated
    fn rotate_if_configured(
        &mut self,
        alias: &str,
        position_type: PositionType,
        options: &SpecOptions,
    ) -> Result<(), SpecError> {
        let Some(prefs) = options.rotation_for(position_type) else {
            return Ok(());
        };

        let tree = self.cache.get(alias)?;
        let rotation = find_canonical_rotation(tree, &prefs);
        if rotation.is_identity() {
            return Ok(());
        }

        let mut rotated = tree.clone();
        rotated.rotate(rotation);
        tracing::debug!(alias, degrees = rotation.degrees(), "rotated tree");
        self.cache.insert(alias, rotated);
        Ok(())
    }
}

/// Examples are rendered as given; their paths only have to resolve
fn example(tree: &MoveTree, position: &Position) -> Result<(), SpecError> {
    let to_error = |e| SpecError::treepath(&position.id, e);

    let mut cursor = match position.initial_position.as_deref() {
        Some(raw) => {
            let initial: InitialPath = raw.parse().map_err(to_error)?;
            tree.cursor_at_initial(&initial).map_err(to_error)?
        }
        None => tree.root(),
    };
    if let Some(raw) = position.next_moves_path.as_deref() {
        let next_moves = Treepath::parse_fragment(raw).map_err(to_error)?;
        for &var in next_moves.iter() {
            if !cursor.move_down(var) {
                return Err(SpecError::Validation {
                    id: position.id.clone(),
                    reason: format!("nextMovesPath '{}' leaves the game", raw),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AutoRotateCropPrefs, IdGenType, PositionLabel};
    use indexmap::IndexMap;

    fn spec_with(root: Grouping, games: &[(&str, &str)]) -> Spec {
        let mapping: IndexMap<String, String> = games
            .iter()
            .map(|(alias, sgf)| (alias.to_string(), sgf.to_string()))
            .collect();
        Spec::new(root, mapping)
    }

    const SIMPLE: &str = "(;GM[1]C[A Game!];B[aa]C[Here's a move])";
    const PROBLEM: &str = "(;GM[1]AB[pa][pb]AW[qa]C[Black to live]\
        (;B[ra]C[Correct])\
        (;B[rb])\
        (;B[sa](;W[sb];B[sc]C[Correct])(;W[rc])))";

    #[test]
    fn simple_game_commentary() {
        let mut root = Grouping::new().with_position_type(PositionType::GameCommentary);
        root.add_position(Position::new("simple", "game"));
        let spec = spec_with(root, &[("game", SIMPLE)]);

        let processed = SpecProcessor::new(&spec).process().unwrap();
        let gen = &processed.root_grouping.generated["simple"];

        assert_eq!(gen.positions.len(), 2);
        assert!(gen
            .positions
            .iter()
            .all(|p| p.initial_position.as_deref() == Some("0")));
        assert_eq!(gen.position_labels()[&PositionLabel::Mainline].len(), 2);
    }

    #[test]
    fn problem_labels() {
        let mut root = Grouping::new();
        root.add_position(Position::new("p1", "prob").with_position_type(PositionType::Problem));
        let spec = spec_with(root, &[("prob", PROBLEM)]);

        let processed = SpecProcessor::new(&spec).process().unwrap();
        let labels = processed.root_grouping.generated["p1"].position_labels();

        assert_eq!(labels[&PositionLabel::Correct].len(), 2);
        assert_eq!(labels[&PositionLabel::Incorrect].len(), 2);
        assert_eq!(labels[&PositionLabel::Indeterminate].len(), 1);
        assert_eq!(labels[&PositionLabel::ProblemRoot].len(), 1);
    }

    #[test]
    fn type_precedence() {
        let mut spec_level = Grouping::new();
        let mut chapter = Grouping::new().with_position_type(PositionType::Problem);
        let mut section = Grouping::new();
        section.add_position(Position::new("inherits", "game"));
        section.add_position(
            Position::new("overrides", "game").with_position_type(PositionType::Example),
        );
        chapter.add_grouping(section);
        spec_level.add_grouping(chapter);
        spec_level.add_position(Position::new("global", "game"));

        let mut spec = spec_with(spec_level, &[("game", SIMPLE)]);
        spec.spec_options.position_type = Some(PositionType::GameCommentary);

        let processed = SpecProcessor::new(&spec).process().unwrap();
        let root = &processed.root_grouping;
        let section = &root.groupings[0].groupings[0];

        assert_eq!(root.generated["global"].label_count(PositionLabel::Mainline), 2);
        assert_eq!(
            section.generated["inherits"].label_count(PositionLabel::ProblemRoot),
            1
        );
        assert!(!section.generated.contains_key("overrides"));
    }

    #[test]
    fn examples_generate_nothing() {
        let mut root = Grouping::new().with_position_type(PositionType::Example);
        root.add_position(Position::new("ex", "game").with_initial_position("1"));
        let spec = spec_with(root, &[("game", SIMPLE)]);

        let processed = SpecProcessor::new(&spec).process().unwrap();
        assert!(processed.root_grouping.generated.is_empty());
    }

    #[test]
    fn off_board_stones_do_not_break_rotation() {
        let game = "(;GM[1]SZ[9]AB[aa][ak](;B[ba]C[Correct])(;B[bb]))";
        let mut root = Grouping::new().with_position_type(PositionType::Problem);
        root.add_position(Position::new("p1", "small"));
        let spec = spec_with(root, &[("small", game)]);

        let processed = SpecProcessor::new(&spec).process().unwrap();
        let labels = processed.root_grouping.generated["p1"].position_labels();
        assert_eq!(labels[&PositionLabel::Correct].len(), 1);
    }

    #[test]
    fn huge_repeat_count_is_a_treepath_error() {
        let mut root = Grouping::new().with_position_type(PositionType::Example);
        root.add_position(
            Position::new("p1", "game").with_initial_position("0.0:4611686018427387904"),
        );
        let spec = spec_with(root, &[("game", SIMPLE)]);

        assert!(matches!(
            SpecProcessor::new(&spec).process(),
            Err(SpecError::Treepath { .. })
        ));
    }

    #[test]
    fn missing_type_is_configuration_error() {
        let mut root = Grouping::new();
        root.add_position(Position::new("p1", "game"));
        let spec = spec_with(root, &[("game", SIMPLE)]);

        assert!(matches!(
            SpecProcessor::new(&spec).process(),
            Err(SpecError::Configuration(_))
        ));
    }

    #[test]
    fn position_variations_are_unsupported() {
        let mut root = Grouping::new().with_position_type(PositionType::PositionVariations);
        root.add_position(Position::new("p1", "game"));
        let spec = spec_with(root, &[("game", SIMPLE)]);

        assert!(matches!(
            SpecProcessor::new(&spec).process(),
            Err(SpecError::Configuration(_))
        ));
    }

    #[test]
    fn duplicate_ids_across_groupings() {
        let mut root = Grouping::new().with_position_type(PositionType::Example);
        root.add_position(Position::new("same", "game"));
        let mut child = Grouping::new();
        child.add_position(Position::new("same", "game"));
        root.add_grouping(child);
        let spec = spec_with(root, &[("game", SIMPLE)]);

        assert!(matches!(
            SpecProcessor::new(&spec).process(),
            Err(SpecError::DuplicateId(_))
        ));
    }

    #[test]
    fn path_ids_collide_for_repeated_games() {
        let mut root = Grouping::new().with_position_type(PositionType::GameCommentary);
        root.add_position(Position::new("first", "game"));
        root.add_position(Position::new("second", "game"));
        let mut spec = spec_with(root, &[("game", SIMPLE)]);
        spec.spec_options.id_gen_type = IdGenType::Path;

        assert!(matches!(
            SpecProcessor::new(&spec).process(),
            Err(SpecError::DuplicateId(_))
        ));
    }

    #[test]
    fn unknown_alias_is_lookup_error() {
        let mut root = Grouping::new().with_position_type(PositionType::Example);
        root.add_position(Position::new("p1", "missing"));
        let spec = spec_with(root, &[("game", SIMPLE)]);

        assert!(matches!(
            SpecProcessor::new(&spec).process(),
            Err(SpecError::Lookup(alias)) if alias == "missing"
        ));
    }

    #[test]
    fn next_moves_rejected_outside_examples() {
        let mut root = Grouping::new().with_position_type(PositionType::Problem);
        root.add_position(Position::new("p1", "game").with_next_moves_path("0"));
        let spec = spec_with(root, &[("game", SIMPLE)]);

        assert!(matches!(
            SpecProcessor::new(&spec).process(),
            Err(SpecError::Validation { .. })
        ));
    }

    #[test]
    fn example_paths_must_resolve() {
        let mut root = Grouping::new().with_position_type(PositionType::Example);
        root.add_position(
            Position::new("p1", "game")
                .with_initial_position("1")
                .with_next_moves_path("0.0"),
        );
        let spec = spec_with(root, &[("game", SIMPLE)]);

        assert!(SpecProcessor::new(&spec).process().is_err());
    }

    #[test]
    fn input_spec_is_untouched_and_reprocessing_is_stable() {
        let mut root = Grouping::new().with_position_type(PositionType::Problem);
        root.add_position(Position::new("p1", "prob"));
        let spec = spec_with(root, &[("prob", PROBLEM)]);
        let before = spec.clone();

        let first = SpecProcessor::new(&spec).process().unwrap();
        let second = SpecProcessor::new(&spec).process().unwrap();

        assert_eq!(spec, before);
        assert!(spec.root_grouping.generated.is_empty());
        assert_eq!(first, second);
        assert_eq!(first.sgf_mapping, spec.sgf_mapping);
    }

    #[test]
    fn rotated_tree_is_cached_for_the_run() {
        // Stones sit in the top-left; the default preference is top-right.
        let tl = "(;GM[1]AB[aa][ab](;B[ba]C[Correct])(;B[bb]))";
        let mut root = Grouping::new().with_position_type(PositionType::Problem);
        root.add_position(Position::new("p1", "tl"));
        let spec = spec_with(root, &[("tl", tl)]);

        let mut processor = SpecProcessor::new(&spec);
        let options = spec.spec_options.clone();
        processor
            .rotate_if_configured("tl", PositionType::Problem, &options)
            .unwrap();

        let cached = processor.cache.peek("tl").unwrap();
        let prefs = AutoRotateCropPrefs::default();
        assert_eq!(
            find_canonical_rotation(cached, &prefs),
            crate::rules::Rotation::NoRotation
        );
        assert_eq!(cached.root().properties().get_all("AB"), ["sa", "ra"]);
    }

    #[test]
    fn rotation_can_be_disabled() {
        let tl = "(;GM[1]AB[aa][ab];B[ba]C[Correct])";
        let mut root = Grouping::new().with_position_type(PositionType::Problem);
        root.add_position(Position::new("p1", "tl"));
        let mut spec = spec_with(root, &[("tl", tl)]);
        spec.spec_options.auto_rotate_crop_prefs = None;

        let mut processor = SpecProcessor::new(&spec);
        let options = spec.spec_options.clone();
        processor
            .rotate_if_configured("tl", PositionType::Problem, &options)
            .unwrap();
        assert!(!processor.cache.contains("tl"));
    }

    #[test]
    fn game_commentary_is_not_rotated_by_default() {
        let mut root = Grouping::new().with_position_type(PositionType::GameCommentary);
        root.add_position(Position::new("p1", "game"));
        let spec = spec_with(root, &[("game", "(;GM[1]C[x];B[aa]C[y])")]);

        let mut processor = SpecProcessor::new(&spec);
        let options = spec.spec_options.clone();
        processor
            .rotate_if_configured("game", PositionType::GameCommentary, &options)
            .unwrap();
        assert!(!processor.cache.contains("game"));
    }
}
