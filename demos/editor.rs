use rewind::{Delete, History, Insert, Signal, TextBuffer, TextEdit, Write};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut editor = TextBuffer::new();
    let mut history = History::builder()
        .limit(32)
        .connect(|signal: Signal| println!("signal: {signal:?}"))
        .build();

    history.execute(&mut editor, TextEdit::from(Write::new("Hello "))).unwrap();
    history.execute(&mut editor, Write::new("World!").into()).unwrap();
    println!("Text: {editor}");

    history.undo(&mut editor).unwrap().unwrap();
    println!("Text: {editor}");

    history.execute(&mut editor, Insert::new(0, "Oh, ").into()).unwrap();
    history.execute(&mut editor, Delete::new(4..10).into()).unwrap();
    println!("Text: {editor}");

    history.set_saved(true);
    history.undo(&mut editor).unwrap().unwrap();
    history.undo(&mut editor).unwrap().unwrap();
    history.undo(&mut editor).unwrap().unwrap();
    if history.undo(&mut editor).is_none() {
        println!("Nothing to undo!");
    }
    println!("Text: {editor:?}");

    println!("{}", history.display());
    history.revert(&mut editor).unwrap().unwrap();
    println!("Text: {editor}");
}
