//! Sticky-notes core and CLI: one flat file per note, a one-line config
//! header carrying the opened flag, and an in-memory registry kept in
//! sync with a visible list projection.

pub mod app;
pub mod editor;
pub mod formatting;
pub mod list;
pub mod note;
pub mod registry;
pub mod store;

use std::env;
use std::error::Error;
use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::app::App;
use crate::formatting::{FormatContext, clip_to_width};

pub fn entry() -> Result<(), Box<dyn Error>> {
    let mut args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        print_help();
        return Ok(());
    }

    let cmd = args.remove(0);
    let dir = note::notes_dir();

    match cmd.as_str() {
        "add" => add_note(args, &dir)?,
        "list" => list_notes(&dir)?,
        "view" => view_note(args, &dir)?,
        "edit" => edit_note(args, &dir)?,
        "delete" => delete_notes(args, &dir)?,
        "path" => println!("{}", dir.display()),
        "help" => print_help(),
        other => {
            eprintln!("Unknown command: {other}");
            print_help();
        }
    }

    Ok(())
}

fn print_help() {
    println!(
        "\
Hose Notes CLI
Usage:
  hose add \"note text\"        Create a note and save it
  hose list                   List notes (open notes marked with *)
  hose view <note>            Print a note's full text
  hose edit <note>            Edit a note in $EDITOR
  hose delete <notes...>      Delete one or more notes
  hose path                   Show the notes directory
  hose help                   Show this message

Environment:
  HOSE_NOTES_DIR              Override notes directory (default: ~/hose)
"
    );
}

fn add_note(args: Vec<String>, dir: &Path) -> Result<(), Box<dyn Error>> {
    if args.is_empty() {
        return Err("Provide the note body, e.g. `hose add \"text\"`".into());
    }
    let body = args.join(" ");

    let mut app = App::open(dir)?;
    let id = app.create()?;
    app.edit(id, &body);
    let stem = app
        .find(id)
        .map(|rec| rec.stem().to_string())
        .unwrap_or_default();
    app.close(id)?;

    if body.len() > 1 {
        println!("Added note {stem}");
    } else {
        println!("Note body too short; nothing was saved.");
    }
    Ok(())
}

fn list_notes(dir: &Path) -> Result<(), Box<dyn Error>> {
    let app = App::open(dir)?;
    if app.list().is_empty() {
        println!("No notes yet. Try `hose add \"text\"`.");
        return Ok(());
    }

    let ctx = FormatContext::from_env();
    for row in app.list().rows() {
        let (name, opened) = match app.find(row.id) {
            Some(rec) => (rec.stem().to_string(), rec.opened),
            None => continue,
        };
        let preview = row.preview.replace(['\n', '\r'], " ");
        let preview = clip_to_width(&preview, name.len() + 3);
        println!(
            "{} {} {}",
            ctx.format_name(&name),
            ctx.format_open_marker(opened),
            preview
        );
    }
    Ok(())
}

fn view_note(args: Vec<String>, dir: &Path) -> Result<(), Box<dyn Error>> {
    let name = args.first().ok_or("Usage: hose view <note>")?;
    let app = App::open(dir)?;
    let rec = app
        .find_by_stem(name)
        .ok_or_else(|| format!("Note {name} not found"))?;
    let stored = store::load(&note::note_path(dir, &rec.filename))?;
    let body = String::from_utf8_lossy(&stored.body);
    print!("{body}");
    if !body.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn edit_note(args: Vec<String>, dir: &Path) -> Result<(), Box<dyn Error>> {
    let name = args.first().ok_or("Usage: hose edit <note>")?;
    let mut app = App::open(dir)?;
    let id = app
        .find_by_stem(name)
        .map(|rec| rec.id)
        .ok_or_else(|| format!("Note {name} not found"))?;
    app.open_note(id);

    let text = app
        .find(id)
        .and_then(|rec| rec.editor.as_ref())
        .map(|editor| editor.text().to_string())
        .ok_or_else(|| format!("Note {name} could not be opened"))?;

    // $EDITOR gets a header-free scratch file; the config byte is ours.
    let scratch = dir.join(format!(".{name}.edit"));
    fs::write(&scratch, &text)?;

    let editor = env::var("EDITOR").unwrap_or_else(|_| "vi".to_string());
    let status = Command::new(&editor)
        .arg(&scratch)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status();
    let status = match status {
        Ok(s) => s,
        Err(err) => {
            let _ = fs::remove_file(&scratch);
            return Err(err.into());
        }
    };
    if !status.success() {
        let _ = fs::remove_file(&scratch);
        return Err("Editor exited with non-zero status".into());
    }

    let edited = fs::read_to_string(&scratch)?;
    let _ = fs::remove_file(&scratch);

    app.edit(id, &edited);
    app.close(id)?;
    println!("Updated {name}");
    Ok(())
}

fn delete_notes(args: Vec<String>, dir: &Path) -> Result<(), Box<dyn Error>> {
    if args.is_empty() {
        return Err("Usage: hose delete <notes...>".into());
    }

    let mut app = App::open(dir)?;
    let mut deleted = 0;
    for name in args {
        match app.find_by_stem(&name).map(|rec| rec.id) {
            Some(id) => {
                app.delete(id);
                println!("Deleted {name}");
                deleted += 1;
            }
            None => println!("Note {name} not found"),
        }
    }
    if deleted == 0 {
        println!("No notes deleted.");
    }
    Ok(())
}
