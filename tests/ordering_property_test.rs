//! Property-based tests for command ordering and conflict detection
//!
//! Uses proptest to generate random command trees

use clisynth::scan::{compare_commands, is_index_file};
use clisynth::{classify, plan_registrations, validate_commands, Attachment, ScannedCommand};
use proptest::prelude::*;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::path::PathBuf;

proptest! {
    #[test]
    fn test_order_is_total(a in any_command(), b in any_command(), c in any_command()) {
        // Antisymmetry
        prop_assert_eq!(compare_commands(&a, &b), compare_commands(&b, &a).reverse());
        // Transitivity
        let ab = compare_commands(&a, &b);
        let bc = compare_commands(&b, &c);
        if ab != Ordering::Greater && bc != Ordering::Greater {
            prop_assert_ne!(compare_commands(&a, &c), Ordering::Greater);
        }
    }

    #[test]
    fn test_sorted_depth_never_decreases(mut commands in any_commands(20)) {
        commands.sort_by(compare_commands);
        for pair in commands.windows(2) {
            prop_assert!(pair[0].depth() <= pair[1].depth());
        }
    }

    #[test]
    fn test_conflict_iff_duplicate_path(commands in any_commands(12)) {
        let mut files = HashSet::new();
        let commands: Vec<ScannedCommand> = commands
            .into_iter()
            .filter(|c| files.insert(c.relative_path.clone()))
            .collect();

        let mut keys = HashSet::new();
        let has_duplicate = !commands.iter().all(|c| keys.insert(c.command_path.clone()));
        prop_assert_eq!(validate_commands(&commands).is_err(), has_duplicate);
    }

    #[test]
    fn test_parents_declared_before_children(mut commands in any_commands(12)) {
        commands.sort_by(compare_commands);
        let mut keys = HashSet::new();
        commands.retain(|c| keys.insert(c.command_path.clone()));

        let registrations = plan_registrations(&commands).unwrap();
        let mut declared = HashSet::new();
        for reg in &registrations {
            if let Attachment::Subcommand { var, parent, .. } = &reg.attachment {
                prop_assert!(parent == "program" || declared.contains(parent));
                declared.insert(var.clone());
            }
        }
    }
}

fn any_commands(max: usize) -> impl Strategy<Value = Vec<ScannedCommand>> {
    prop::collection::vec(any_command(), 0..max)
}

fn any_command() -> impl Strategy<Value = ScannedCommand> {
    let segment = prop_oneof![Just("a"), Just("b"), Just("c-d"), Just("index")];
    let ext = prop_oneof![Just("ts"), Just("js")];

    (prop::collection::vec(segment, 1..4), ext).prop_map(|(segments, ext)| {
        let mut relative_path: PathBuf = segments.iter().collect();
        relative_path.set_extension(ext);
        let is_index = is_index_file(&relative_path);
        ScannedCommand {
            absolute_path: PathBuf::from("/work/src/commands").join(&relative_path),
            command_path: classify(&relative_path, is_index),
            relative_path,
            is_index,
        }
    })
}
