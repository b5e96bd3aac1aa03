use crate::model::MimeBundle;
use crate::model::MimeData;
use crate::model::Output;
use crate::node::Node;

/// MIME types a rich output may be shown as, highest priority first.
///
/// Images win over HTML: a figure that also ships an HTML repr is shown as the figure.
pub const MIME_PRIORITY: [&str; 4] = ["image/png", "image/jpeg", "text/html", "text/plain"];

/// Renders one output record.
///
/// Returns `None` for unknown output kinds and for rich outputs with nothing displayable; the
/// caller simply omits them.
pub fn render_output(output: &Output) -> Option<Node> {
    match output {
        Output::Stream { name, text } => Some(Node::Stream {
            name: name.clone(),
            text: text.clone(),
        }),
        Output::ExecuteResult { data, .. } | Output::DisplayData { data } => {
            let Some(data) = data else {
                tracing::debug!(
                    output_type = output.output_type(),
                    "rich output without a data mapping; skipped"
                );
                return None;
            };
            render_mime_bundle(data)
        }
        Output::Error {
            ename,
            evalue,
            traceback,
        } => {
            let text = match traceback {
                Some(lines) if !lines.is_empty() => lines.join("\n"),
                _ => evalue.clone().unwrap_or_default(),
            };
            Some(Node::Error {
                ename: ename.clone(),
                evalue: evalue.clone(),
                text,
            })
        }
        Output::Unknown { output_type } => {
            tracing::debug!(?output_type, "unknown output type; skipped");
            None
        }
    }
}

/// Picks the first key of [`MIME_PRIORITY`] present in `data` and renders it.
pub fn render_mime_bundle(data: &MimeBundle) -> Option<Node> {
    let Some((mime, payload)) = select_representation(data) else {
        tracing::debug!(
            keys = ?data.keys().collect::<Vec<_>>(),
            "no displayable representation; skipped"
        );
        return None;
    };
    let Some(payload) = payload.as_text() else {
        tracing::debug!(mime, "representation payload is not text; skipped");
        return None;
    };

    let node = match mime {
        "image/png" | "image/jpeg" => Node::Image {
            mime: mime.to_string(),
            src: data_uri(mime, payload),
        },
        "text/html" => Node::Html {
            markup: payload.to_string(),
        },
        _ => Node::Text {
            text: payload.to_string(),
        },
    };
    Some(node)
}

pub fn select_representation(data: &MimeBundle) -> Option<(&'static str, &MimeData)> {
    MIME_PRIORITY
        .iter()
        .find_map(|mime| data.get(*mime).map(|payload| (*mime, payload)))
}

/// `data:<mime>;base64,<payload>`, with the payload passed through untouched.
pub fn data_uri(mime: &str, base64_payload: &str) -> String {
    format!("data:{mime};base64,{base64_payload}")
}
