//! Output formatting. Everything printed to stdout is built here.

use facetstate::schema::ParameterConfig;
use serde::Serialize;

/// Pretty JSON followed by a newline.
pub fn json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    Ok(format!("{}\n", serde_json::to_string_pretty(value)?))
}

/// One line per parameter: name, shape, URL keys, default.
pub fn params<'a>(params: impl IntoIterator<Item = &'a ParameterConfig>) -> String {
    let rows: Vec<[String; 4]> = params
        .into_iter()
        .map(|p| {
            let default = serde_json::to_string(&p.default_value()).unwrap_or_default();
            [
                p.name.to_string(),
                p.kind.shape().to_string(),
                p.kind.url_keys().join(","),
                default,
            ]
        })
        .collect();

    let mut widths = [0usize; 3];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.len());
        }
    }

    let mut out = String::new();
    for [name, shape, keys, default] in rows {
        out.push_str(&format!(
            "{name:<w0$}  {shape:<w1$}  {keys:<w2$}  {default}\n",
            w0 = widths[0],
            w1 = widths[1],
            w2 = widths[2],
        ));
    }
    out
}
