//! HTML pages, rendered with maud.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::tracking::TrackingCode;

use super::flash::Flash;

const CSS: &str = r#"
body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 42rem; padding: 0 1rem; }
label { display: block; margin-top: 1rem; font-weight: 600; }
input, textarea { width: 100%; box-sizing: border-box; font: inherit; padding: .4rem; }
textarea { font-family: ui-monospace, monospace; }
button { margin-top: 1.25rem; padding: .5rem 1.5rem; font: inherit; }
.flash { padding: .6rem .8rem; border-radius: 4px; }
.flash-success { background: #e6f4ea; color: #1e4620; }
.flash-error { background: #fdecea; color: #611a15; }
.preview dt { font-weight: 600; }
.preview dd { margin: 0 0 .5rem 0; font-family: ui-monospace, monospace; }
.hint { color: #555; font-size: .9rem; }
"#;

/// The intake form. `preview` is the code the next submission would get if
/// nothing else is saved first.
pub fn form_page(preview: &TrackingCode, flash: Option<&Flash>) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Material intake" }
                style { (PreEscaped(CSS)) }
            }
            body {
                main.intake {
                    h1 { "Material intake" }
                    @if let Some(flash) = flash {
                        p class={ "flash flash-" (flash.level.as_str()) } role="status" {
                            (flash.message)
                        }
                    }
                    dl.preview {
                        dt { "Date" }
                        dd { (preview.display_date) }
                        dt { "Tracking code" }
                        dd { (preview.code) }
                    }
                    form method="post" action="/submit" {
                        label for="purchaseOrderRef" { "Purchase order" }
                        input id="purchaseOrderRef" name="purchaseOrderRef" type="text" required;
                        label for="clientName" { "Client" }
                        input id="clientName" name="clientName" type="text" required;
                        label for="materialsText" { "Materials" }
                        p.hint {
                            "One material per line: description, then quantity, separated by a tab, a semicolon or two spaces."
                        }
                        textarea id="materialsText" name="materialsText" rows="12" {}
                        button type="submit" { "Save" }
                    }
                }
            }
        }
    }
}
