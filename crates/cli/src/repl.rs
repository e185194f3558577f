use anyhow::{bail, Context as AnyhowContext, Result};
use holonet_model::ResourceKind;
use holonet_view::{Point, SearchCoordinator};
use log::debug;

/// One line typed at the `holonet>` prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    /// `index` is zero-based; the prompt counts from one.
    Open { kind: ResourceKind, index: usize },
    Close(ResourceKind),
    Click(Point),
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  /<text> | search <text>     set the query for every view
  open <people|vehicles> <n>  open the n-th item
  close <people|vehicles>     close that view's overlay
  click <x> <y>               pointer-down at (x, y)
  show                        redraw
  help                        this text
  quit";

/// Parse a prompt line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    if let Some(query) = line.strip_prefix('/') {
        return Ok(Some(Command::Search(query.trim().to_string())));
    }

    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let args: Vec<&str> = rest.split_whitespace().collect();
    let command = match word.to_ascii_lowercase().as_str() {
        "search" | "s" => Command::Search(rest.to_string()),
        "open" | "o" => {
            let [kind, n] = args.as_slice() else {
                bail!("usage: open <people|vehicles> <n>");
            };
            let n: usize = n.parse().with_context(|| format!("not an item number: {n}"))?;
            if n == 0 {
                bail!("items are numbered from 1");
            }
            Command::Open {
                kind: parse_kind(kind)?,
                index: n - 1,
            }
        }
        "close" | "c" => {
            let [kind] = args.as_slice() else {
                bail!("usage: close <people|vehicles>");
            };
            Command::Close(parse_kind(kind)?)
        }
        "click" => {
            let [x, y] = args.as_slice() else {
                bail!("usage: click <x> <y>");
            };
            let x = x.parse().with_context(|| format!("bad x coordinate: {x}"))?;
            let y = y.parse().with_context(|| format!("bad y coordinate: {y}"))?;
            Command::Click(Point::new(x, y))
        }
        "show" | "ls" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => bail!("unknown command: {other} (try `help`)"),
    };
    Ok(Some(command))
}

fn parse_kind(raw: &str) -> Result<ResourceKind> {
    Ok(raw.parse::<ResourceKind>()?)
}

/// What the prompt loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Redraw,
    Help,
    Quit,
}

/// Apply `command` to the coordinator and wait until every view has settled.
pub async fn execute(browser: &mut SearchCoordinator, command: Command) -> Result<Flow> {
    let flow = match command {
        Command::Search(query) => {
            browser.set_query(&query);
            Flow::Redraw
        }
        Command::Open { kind, index } => {
            browser
                .view_mut(kind)?
                .activate_index(index)
                .with_context(|| format!("cannot open {kind} item {}", index + 1))?;
            Flow::Redraw
        }
        Command::Close(kind) => {
            if !browser.view_mut(kind)?.dismiss() {
                debug!("{kind} overlay was already closed");
            }
            Flow::Redraw
        }
        Command::Click(point) => {
            browser.pointer_down(point);
            Flow::Redraw
        }
        Command::Show => Flow::Redraw,
        Command::Help => return Ok(Flow::Help),
        Command::Quit => return Ok(Flow::Quit),
    };
    browser.settle().await;
    Ok(flow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::overlay_region;
    use holonet_fetch::testing::{page, ScriptedTransport};
    use holonet_view::InteractionSource;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn parses_prompt_lines() {
        assert_eq!(parse("  ").unwrap(), None);
        assert_eq!(
            parse("/ sky ").unwrap(),
            Some(Command::Search("sky".into()))
        );
        assert_eq!(
            parse("search luke sky").unwrap(),
            Some(Command::Search("luke sky".into()))
        );
        assert_eq!(parse("search").unwrap(), Some(Command::Search(String::new())));
        assert_eq!(
            parse("open vehicles 2").unwrap(),
            Some(Command::Open {
                kind: ResourceKind::Vehicles,
                index: 1
            })
        );
        assert_eq!(
            parse("close person").unwrap(),
            Some(Command::Close(ResourceKind::People))
        );
        assert_eq!(
            parse("click 3 -4").unwrap(),
            Some(Command::Click(Point::new(3, -4)))
        );
        assert_eq!(parse("QUIT").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(parse("open people").is_err());
        assert!(parse("open people 0").is_err());
        assert!(parse("open starships 1").is_err());
        assert!(parse("click 1").is_err());
        assert!(parse("launch").is_err());
    }

    #[tokio::test]
    async fn open_then_click_outside_closes_overlay() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond("https://api.test/people/", page(&[]));
        transport.respond("https://api.test/vehicles/", page(&["Sand Crawler"]));
        transport.respond(
            "https://api.test/items/1/",
            json!({"name": "Sand Crawler", "model": "Digger Crawler"}),
        );
        let mut browser = SearchCoordinator::standard(
            "https://api.test",
            None,
            transport,
            InteractionSource::new(),
        );
        browser
            .view_mut(ResourceKind::Vehicles)
            .unwrap()
            .attach_boundary(overlay_region(ResourceKind::Vehicles));
        browser.start();
        browser.settle().await;

        let open = Command::Open {
            kind: ResourceKind::Vehicles,
            index: 0,
        };
        assert_eq!(execute(&mut browser, open).await.unwrap(), Flow::Redraw);
        let vehicles = browser.view(ResourceKind::Vehicles).unwrap().state();
        assert!(vehicles.overlay_open);

        let inside = overlay_region(ResourceKind::Vehicles);
        execute(&mut browser, Command::Click(Point::new(inside.x + 1, inside.y + 1)))
            .await
            .unwrap();
        assert!(browser.view(ResourceKind::Vehicles).unwrap().state().overlay_open);

        execute(&mut browser, Command::Click(Point::new(0, 0)))
            .await
            .unwrap();
        assert!(!browser.view(ResourceKind::Vehicles).unwrap().state().overlay_open);
    }

    #[tokio::test]
    async fn out_of_range_open_is_reported() {
        let transport = Arc::new(ScriptedTransport::new());
        let mut browser = SearchCoordinator::standard(
            "https://api.test",
            None,
            transport,
            InteractionSource::new(),
        );
        let open = Command::Open {
            kind: ResourceKind::People,
            index: 4,
        };
        let err = execute(&mut browser, open).await.unwrap_err();
        assert!(format!("{err:#}").contains("out of range"), "{err:#}");
        assert_eq!(execute(&mut browser, Command::Quit).await.unwrap(), Flow::Quit);
    }
}
