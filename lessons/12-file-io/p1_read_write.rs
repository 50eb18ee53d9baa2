//! Lesson 12: Reading and writing files
//!
//! Run with: cargo run --bin lesson_12_read_write

use lesson_course::fileio::{
    append_line, copy_file, file_exists, list_tree, read_lines, write_lines, write_text,
};
use lesson_course::{banner, done, key_points, section};

fn main() -> anyhow::Result<()> {
    banner("File I/O");

    // everything happens in a scratch directory removed on exit
    let dir = tempfile::tempdir()?;
    let notes = dir.path().join("notes.txt");

    section("Writing");
    write_text(&notes, "first line\nsecond line\n")?;
    done(&format!("wrote {}", notes.display()));
    append_line(&notes, "appended line")?;
    done("appended a line");

    println!();
    section("Reading");
    for (i, line) in read_lines(&notes)?.iter().enumerate() {
        println!("{}. {}", i + 1, line);
    }

    println!();
    section("Writing many lines");
    let todo = dir.path().join("todo.txt");
    write_lines(&todo, &["buy milk", "write tests", "ship it"])?;
    println!("todo has {} lines", read_lines(&todo)?.len());

    println!();
    section("Copying and checking");
    let sub = dir.path().join("backup");
    std::fs::create_dir_all(&sub)?;
    let copy = sub.join("notes.bak");
    let bytes = copy_file(&notes, &copy)?;
    println!("1. copied {} bytes", bytes);
    println!("2. exists(copy) = {}", file_exists(&copy));
    println!("3. exists(missing) = {}", file_exists(&dir.path().join("missing.txt")));

    println!();
    section("Errors");
    match read_lines(&dir.path().join("missing.txt")) {
        Ok(_) => println!("unexpectedly found the file"),
        Err(e) => println!("{}", e),
    }

    println!();
    section("Walking a directory");
    for path in list_tree(dir.path())? {
        println!("  {}", path.display());
    }

    key_points(&[
        "fs::read_to_string and fs::write cover the simple cases",
        "BufReader and BufWriter batch small reads and writes",
        "OpenOptions controls append, create and truncate",
        "Attach the path to I/O errors so messages say which file failed",
    ]);
    Ok(())
}
