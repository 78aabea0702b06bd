use proptest::prelude::*;
use rewind::{Checked, Delete, History, Insert, Originator, TextBuffer, TextEdit, Write};

/// Builds an edit that is valid for a buffer of `len` ascii bytes.
fn edit(len: usize, kind: u8, a: usize, b: usize, text: String) -> TextEdit {
    match kind % 3 {
        0 => Write::new(text).into(),
        1 => Insert::new(a % (len + 1), text).into(),
        _ => {
            let start = a % (len + 1);
            let end = start + b % (len - start + 1);
            Delete::new(start..end).into()
        }
    }
}

/// Executes the generated edits and returns the state after each one.
fn run(
    target: &mut TextBuffer,
    history: &mut History<Checked<TextEdit>>,
    ops: &[(u8, usize, usize, String)],
) -> Vec<String> {
    let mut states = vec![target.as_str().to_owned()];
    for (kind, a, b, text) in ops {
        let command = edit(target.len(), *kind, *a, *b, text.clone());
        history.execute(target, Checked::new(command)).unwrap();
        states.push(target.as_str().to_owned());
    }
    states
}

fn ops() -> impl Strategy<Value = Vec<(u8, usize, usize, String)>> {
    prop::collection::vec((any::<u8>(), any::<usize>(), any::<usize>(), "[a-z ]{0,6}"), 0..24)
}

proptest! {
    #[test]
    fn undo_all_restores_initial(initial in "[a-z]{0,8}", ops in ops()) {
        let mut target = TextBuffer::from(initial.as_str());
        let mut history = History::new();
        run(&mut target, &mut history, &ops);
        for _ in 0..ops.len() {
            history.undo(&mut target).unwrap().unwrap();
        }
        prop_assert_eq!(target.as_str(), initial.as_str());
        prop_assert!(history.undo(&mut target).is_none());
        prop_assert_eq!(target.as_str(), initial.as_str());
    }

    #[test]
    fn undo_then_redo_reproduces_state(ops in ops(), undos in any::<usize>()) {
        let mut target = TextBuffer::new();
        let mut history = History::new();
        let states = run(&mut target, &mut history, &ops);
        let j = undos % (ops.len() + 1);
        for i in 0..j {
            history.undo(&mut target).unwrap().unwrap();
            prop_assert_eq!(target.as_str(), states[ops.len() - i - 1].as_str());
        }
        for _ in 0..j {
            history.redo(&mut target).unwrap().unwrap();
        }
        prop_assert_eq!(target.as_str(), states[ops.len()].as_str());
        prop_assert!(history.redo(&mut target).is_none());
    }

    #[test]
    fn execute_after_undo_discards_redo(ops in ops(), undos in 1usize..8) {
        let mut target = TextBuffer::new();
        let mut history = History::new();
        run(&mut target, &mut history, &ops);
        let undone = undos.min(history.head());
        for _ in 0..undone {
            history.undo(&mut target).unwrap().unwrap();
        }
        history.execute(&mut target, Checked::new(Write::new("!").into())).unwrap();
        prop_assert!(!history.can_redo());
        prop_assert!(history.redo(&mut target).is_none());
        prop_assert_eq!(history.len(), ops.len() - undone + 1);
    }

    #[test]
    fn limit_is_respected(ops in ops(), limit in 1usize..6) {
        let mut target = TextBuffer::new();
        let mut history = History::builder().limit(limit).build();
        run(&mut target, &mut history, &ops);
        prop_assert_eq!(history.len(), ops.len().min(limit));
    }

    #[test]
    fn save_restore_is_identity(text in "\\PC{0,16}") {
        let mut target = TextBuffer::from(text.as_str());
        let memento = target.save();
        target.restore(&memento);
        prop_assert_eq!(target.as_str(), text.as_str());
    }
}
