// Command scripts
// One command per line, e.g.
//
//     type Hello world
//     select 0 5
//     bold
//     list numbered
//
// Blank lines and lines starting with `#` are skipped.

use crate::commands::Command;
use crate::error::{Error, Result};
use crate::richtext::format::{CharAttribute, Color, FontDescriptor};
use std::path::PathBuf;

/// Parse a whole script
pub fn parse(source: &str) -> Result<Vec<Command>> {
    let mut commands = Vec::new();
    for (index, line) in source.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let command = parse_line(trimmed).map_err(|message| Error::Script {
            line: index + 1,
            message,
        })?;
        commands.push(command);
    }
    Ok(commands)
}

fn parse_line(line: &str) -> std::result::Result<Command, String> {
    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    };

    let command = match keyword {
        // `type` keeps everything after the first space, including inner spaces
        "type" => {
            let mut text = line[keyword.len()..].chars();
            text.next();
            Command::Type(text.as_str().to_string())
        }
        "newline" => no_args(keyword, rest, Command::Newline)?,
        "backspace" => no_args(keyword, rest, Command::Backspace)?,
        "delete" => no_args(keyword, rest, Command::Delete)?,
        "select" => {
            let args = numbers(rest)?;
            match args[..] {
                [anchor, caret] => Command::Select { anchor, caret },
                _ => return Err("select expects two offsets".to_string()),
            }
        }
        "caret" => {
            let args = numbers(rest)?;
            match args[..] {
                [offset] => Command::Select {
                    anchor: offset,
                    caret: offset,
                },
                _ => return Err("caret expects one offset".to_string()),
            }
        }
        "select-all" => no_args(keyword, rest, Command::SelectAll)?,

        "new" => no_args(keyword, rest, Command::New)?,
        "open" => Command::Open(path_arg(keyword, rest)?),
        "save" => no_args(keyword, rest, Command::Save)?,
        "save-as" => Command::SaveAs(path_arg(keyword, rest)?),
        "export" => Command::ExportPlainText(path_arg(keyword, rest)?),

        "undo" => no_args(keyword, rest, Command::Undo)?,
        "redo" => no_args(keyword, rest, Command::Redo)?,
        "cut" => no_args(keyword, rest, Command::Cut)?,
        "copy" => no_args(keyword, rest, Command::Copy)?,
        "paste" => no_args(keyword, rest, Command::Paste)?,

        "bold" => no_args(keyword, rest, Command::Toggle(CharAttribute::Bold))?,
        "italic" => no_args(keyword, rest, Command::Toggle(CharAttribute::Italic))?,
        "underline" => no_args(keyword, rest, Command::Toggle(CharAttribute::Underline))?,
        "align" => Command::Align(rest.parse()?),
        "list" => Command::List(rest.parse()?),
        "color" => match rest {
            "cancel" => Command::Color(None),
            hex => Command::Color(Some(hex.parse::<Color>().map_err(|e| e.to_string())?)),
        },
        "font" => match rest {
            "cancel" => Command::Font(None),
            value => Command::Font(Some(parse_font(value)?)),
        },
        "hr" => no_args(keyword, rest, Command::HorizontalRule)?,
        "plain" => no_args(keyword, rest, Command::MakePlainText)?,

        other => return Err(format!("unknown command '{other}'")),
    };
    Ok(command)
}

fn no_args(keyword: &str, rest: &str, command: Command) -> std::result::Result<Command, String> {
    if rest.is_empty() {
        Ok(command)
    } else {
        Err(format!("{keyword} takes no arguments"))
    }
}

fn numbers(rest: &str) -> std::result::Result<Vec<usize>, String> {
    rest.split_whitespace()
        .map(|n| n.parse().map_err(|_| format!("invalid offset '{n}'")))
        .collect()
}

fn path_arg(keyword: &str, rest: &str) -> std::result::Result<PathBuf, String> {
    if rest.is_empty() {
        Err(format!("{keyword} expects a path"))
    } else {
        Ok(PathBuf::from(rest))
    }
}

/// `FAMILY SIZE`, where the family may contain spaces
fn parse_font(value: &str) -> std::result::Result<FontDescriptor, String> {
    let (family, size) = value
        .rsplit_once(char::is_whitespace)
        .ok_or_else(|| "font expects a family and a point size".to_string())?;
    let size = size
        .parse::<u16>()
        .map_err(|_| format!("invalid point size '{size}'"))?;
    let family = family.trim();
    if family.is_empty() {
        return Err("font family is empty".to_string());
    }
    Ok(FontDescriptor::new(family, size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::richtext::format::{Alignment, ListStyle};

    #[test]
    fn test_parse_script() {
        let commands = parse(
            "# a comment\n\
             type Hello  world\n\
             \n\
             select 0 5\n\
             bold\n\
             align center\n\
             list disc\n\
             caret 2\n\
             newline\n",
        )
        .unwrap();

        assert_eq!(
            commands,
            vec![
                Command::Type("Hello  world".into()),
                Command::Select {
                    anchor: 0,
                    caret: 5
                },
                Command::Toggle(CharAttribute::Bold),
                Command::Align(Alignment::Center),
                Command::List(ListStyle::Bulleted),
                Command::Select {
                    anchor: 2,
                    caret: 2
                },
                Command::Newline,
            ]
        );
    }

    #[test]
    fn test_type_without_text_types_nothing() {
        assert_eq!(parse("type").unwrap(), vec![Command::Type(String::new())]);
    }

    #[test]
    fn test_color_and_font() {
        let source = "color #FF8000\ncolor cancel\nfont Noto Sans 11\nfont cancel";
        let commands = parse(source).unwrap();
        assert_eq!(
            commands,
            vec![
                Command::Color(Some(Color::rgb(0xff, 0x80, 0x00))),
                Command::Color(None),
                Command::Font(Some(FontDescriptor::new("Noto Sans", 11))),
                Command::Font(None),
            ]
        );
    }

    #[test]
    fn test_errors_report_line_numbers() {
        let err = parse("type ok\n\nfrobnicate").unwrap_err();
        assert_eq!(err.to_string(), "line 3: unknown command 'frobnicate'");

        let err = parse("select 1").unwrap_err();
        assert_eq!(err.to_string(), "line 1: select expects two offsets");

        let err = parse("bold please").unwrap_err();
        assert_eq!(err.to_string(), "line 1: bold takes no arguments");

        let err = parse("align middle").unwrap_err();
        assert_eq!(err.to_string(), "line 1: unknown alignment 'middle'");

        let err = parse("font Serif").unwrap_err();
        assert_eq!(
            err.to_string(),
            "line 1: font expects a family and a point size"
        );

        assert!(matches!(
            parse("color red"),
            Err(Error::Script { line: 1, .. })
        ));
    }

    #[test]
    fn test_file_commands() {
        assert_eq!(
            parse("open notes/todo list.txt\nsave\nsave-as b.txt\nhr\nexport out.txt").unwrap(),
            vec![
                Command::Open(PathBuf::from("notes/todo list.txt")),
                Command::Save,
                Command::SaveAs(PathBuf::from("b.txt")),
                Command::HorizontalRule,
                Command::ExportPlainText(PathBuf::from("out.txt")),
            ]
        );
        assert!(parse("open").is_err());
        assert!(parse("save-as").is_err());
    }
}
