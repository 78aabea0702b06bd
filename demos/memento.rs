use rewind::{Caretaker, Originator, TextBuffer};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut editor = TextBuffer::new();
    let mut caretaker = Caretaker::new();

    editor.append("Hello, ");
    println!("Current text: {editor}");
    caretaker.save_state(editor.save());

    editor.append("world!");
    println!("Current text: {editor}");
    caretaker.save_state(editor.save());

    editor.append(" How are you?");
    println!("Current text: {editor}");

    while caretaker.rollback(&mut editor) {
        println!("Current text: {editor}");
    }
}
