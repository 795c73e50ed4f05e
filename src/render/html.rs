use std::fs;
use std::io::Write as _;
use std::path::Path;

use color_eyre::eyre::{eyre, Result, WrapErr};
use tracing::debug;

use super::{cell, Tone};
use crate::state::MarketState;
use crate::window::Window;

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Cryptocurrency Prices and Changes</title>
<link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/css/bootstrap.min.css" rel="stylesheet">
<style>
.center-text {
text-align: center;
}
.table-hover tbody tr:hover {
background-color: #f5f5f5;
}
.table-hover tbody tr:hover td {
font-weight: bold;
}
</style>
</head>
<body>
<div class="container mt-5">
<h1 class="mb-4 center-text">Cryptocurrency Prices and Changes</h1>
<table class="table table-striped table-hover">
"#;

const TAIL: &str = r#"</table>
</div>
<script src="https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/js/bootstrap.bundle.min.js"></script>
</body>
</html>
"#;

pub fn tone_color(tone: Tone) -> &'static str {
    match tone {
        Tone::Positive => "#28a745",
        Tone::Negative => "#dc3545",
        Tone::Neutral => "#000000",
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Self-contained page with the same cells as the console table.
pub fn render_document(symbols: &[String], state: &MarketState) -> String {
    let mut out = String::from(HEAD);

    out.push_str("<thead>\n<tr>\n<th scope=\"col\">Statistic</th>\n");
    for symbol in symbols {
        out.push_str(&format!("<th scope=\"col\">{}</th>\n", escape(symbol)));
    }
    out.push_str("</tr>\n</thead>\n<tbody>\n");

    for window in Window::ALL {
        out.push_str(&format!("<tr>\n<td>{}</td>\n", window.label()));
        for symbol in symbols {
            let c = cell(state, symbol, window);
            match c.tone {
                Some(tone) => out.push_str(&format!(
                    "<td style=\"color: {};\">{}</td>\n",
                    tone_color(tone),
                    escape(&c.text)
                )),
                None => out.push_str(&format!("<td>{}</td>\n", escape(&c.text))),
            }
        }
        out.push_str("</tr>\n");
    }

    out.push_str("</tbody>\n");
    out.push_str(TAIL);
    out
}

/// Writes `contents` next to `path` and renames it into place.
pub fn write_document(path: &Path, contents: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| eyre!("output path {} has no file name", path.display()))?;
    let tmp = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

    let mut file = fs::File::create(&tmp)
        .wrap_err_with(|| format!("failed to create {}", tmp.display()))?;

    let written = file
        .write_all(contents.as_bytes())
        .wrap_err_with(|| format!("failed to write {}", tmp.display()))
        .and_then(|_| {
            file.sync_all()
                .wrap_err_with(|| format!("failed to flush {}", tmp.display()))
        });
    drop(file);

    let moved = written.and_then(|_| {
        fs::rename(&tmp, path)
            .wrap_err_with(|| format!("failed to move html into {}", path.display()))
    });
    if let Err(e) = moved {
        fs::remove_file(&tmp).ok();
        return Err(e);
    }

    debug!(path = %path.display(), bytes = contents.len(), "html written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{PriceSnapshot, Reading};

    fn state() -> MarketState {
        let mut snapshot = PriceSnapshot::unavailable();
        snapshot.prices.insert(Window::RealTime, Reading::Available(50000.0));
        snapshot.prices.insert(Window::OneDay, Reading::Available(49000.0));
        snapshot.prices.insert(Window::ThreeDays, Reading::Available(51000.0));
        snapshot.prices.insert(Window::SevenDays, Reading::Available(50000.0));
        let mut state = MarketState::new();
        state.record("BTC", &snapshot);
        state
    }

    fn symbols() -> Vec<String> {
        vec!["BTC".to_string(), "ETH".to_string()]
    }

    #[test]
    fn cells_carry_inline_colors() {
        let doc = render_document(&symbols(), &state());

        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<th scope=\"col\">BTC</th>\n<th scope=\"col\">ETH</th>"));
        assert!(doc.contains("<tr>\n<td>Real-Time</td>\n<td>50000.0</td>\n<td>NA</td>\n</tr>"));
        assert!(doc.contains("<td style=\"color: #28a745;\">2.04%</td>"));
        assert!(doc.contains("<td style=\"color: #dc3545;\">-1.96%</td>"));
        assert!(doc.contains("<td style=\"color: #000000;\">0.0%</td>"));
        assert!(doc.contains("<tr>\n<td>1 year</td>\n<td>NA</td>\n<td>NA</td>\n</tr>"));
        assert!(doc.trim_end().ends_with("</html>"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let state = state();
        assert_eq!(
            render_document(&symbols(), &state),
            render_document(&symbols(), &state)
        );
    }

    #[test]
    fn symbols_are_escaped() {
        let doc = render_document(&["<b>".to_string()], &MarketState::new());
        assert!(doc.contains("<th scope=\"col\">&lt;b&gt;</th>"));
    }

    #[test]
    fn write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crypto.prices.html");
        fs::write(&path, "stale").unwrap();

        write_document(&path, "<html></html>").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "<html></html>");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.html");

        let err = write_document(&path, "x").unwrap_err();
        assert!(err.to_string().contains("failed to create"));
    }

    #[test]
    fn failed_rename_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crypto.prices.html");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        let err = write_document(&path, "<html></html>").unwrap_err();

        assert!(err.to_string().contains("failed to move html"));
        assert!(!dir.path().join(".crypto.prices.html.tmp").exists());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
