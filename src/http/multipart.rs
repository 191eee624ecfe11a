use bytes::Bytes;

use crate::{
    error::{RequestMapError, Result},
    value::Upload,
};

/// A decoded `multipart/form-data` body.
///
/// Parts carrying a `filename` are uploads; the rest are plain form fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Multipart {
    pub fields: Vec<(String, String)>,
    pub files: Vec<Upload>,
}

fn err(msg: impl Into<String>) -> RequestMapError {
    RequestMapError::Multipart(msg.into())
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if from > haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + from)
}

fn skip_padding(body: &[u8], mut pos: usize) -> usize {
    while matches!(body.get(pos), Some(b' ' | b'\t')) {
        pos += 1;
    }
    pos
}

/// Next `\r\n--boundary` that really closes a part: it must be followed by
/// `--` or by optional padding and CRLF, so content lines such as
/// `--boundaryX` do not end the part early.
fn find_delimiter(body: &[u8], delimiter: &[u8], from: usize) -> Option<usize> {
    let mut at = from;
    while let Some(idx) = find(body, delimiter, at) {
        let rest = &body[idx + delimiter.len()..];
        let after = &body[skip_padding(body, idx + delimiter.len())..];
        if rest.starts_with(b"--") || after.starts_with(b"\r\n") {
            return Some(idx);
        }
        at = idx + 1;
    }
    None
}

/// `form-data; name="a"; filename="b.txt"` -> [("name","a"), ("filename","b.txt")]
fn disposition_params(value: &str) -> Vec<(String, String)> {
    value
        .split(';')
        .skip(1)
        .filter_map(|p| p.trim().split_once('='))
        .map(|(k, v)| (k.trim().to_ascii_lowercase(), v.trim().trim_matches('"').to_string()))
        .collect()
}

impl Multipart {
    pub fn parse(body: &[u8], boundary: &str) -> Result<Self> {
        let delimiter = format!("--{}", boundary);
        let delimiter = delimiter.as_bytes();
        let mut next_delim = b"\r\n".to_vec();
        next_delim.extend_from_slice(delimiter);
        let mut form = Multipart::default();

        let mut pos = find(body, delimiter, 0).ok_or_else(|| err("boundary not found"))?
            + delimiter.len();

        loop {
            if body[pos..].starts_with(b"--") {
                break;
            }
            pos = skip_padding(body, pos);
            if !body[pos..].starts_with(b"\r\n") {
                return Err(err("expected CRLF after boundary"));
            }
            pos += 2;

            let head_end = find(body, b"\r\n\r\n", pos).ok_or_else(|| err("unterminated part headers"))?;
            let head = std::str::from_utf8(&body[pos..head_end])
                .map_err(|_| err("part headers not UTF-8"))?;
            let data_start = head_end + 4;

            let data_end = find_delimiter(body, &next_delim, data_start)
                .ok_or_else(|| err("missing closing boundary"))?;

            let mut name = None;
            let mut filename = None;
            let mut content_type = None;
            for line in head.split("\r\n") {
                let Some((k, v)) = line.split_once(':') else { continue };
                match k.trim().to_ascii_lowercase().as_str() {
                    "content-disposition" => {
                        for (pk, pv) in disposition_params(v) {
                            match pk.as_str() {
                                "name" => name = Some(pv),
                                "filename" => filename = Some(pv),
                                _ => {}
                            }
                        }
                    }
                    "content-type" => content_type = Some(v.trim().to_string()),
                    _ => {}
                }
            }

            let data = &body[data_start..data_end];
            // 没有 name 的 part 无法对应参数，直接跳过
            if let Some(name) = name {
                if filename.is_some() {
                    form.files.push(Upload {
                        name,
                        filename,
                        content_type,
                        data: Bytes::copy_from_slice(data),
                    });
                } else {
                    let text = String::from_utf8_lossy(data).into_owned();
                    form.fields.push((name, text));
                }
            }

            pos = data_end + next_delim.len();
        }

        Ok(form)
    }
}
