//! Per-request parameter sources. Each returns one [`Batch`] for the
//! aggregation pipeline, in the order the resolver merges them.

use crate::{
    error::{RequestMapError, Result},
    http::{
        meta::HttpMetadata,
        multipart::Multipart,
        params::{Pairs, Params},
    },
    map::Batch,
    value::Value,
};

/// Path variables filled in by routing. Absent variables mean the request
/// never went through the router, which is a caller bug.
pub fn path_variables(meta: &HttpMetadata) -> Result<Batch> {
    let data = meta
        .params
        .as_ref()
        .and_then(|p| p.data.as_ref())
        .ok_or(RequestMapError::MissingPathVariables)?;
    Ok(data
        .iter()
        .map(|(k, v)| (k.clone(), Value::from(v.as_str())))
        .collect())
}

/// Decodes a multipart body, or `None` when the request is not a non-empty
/// multipart request.
pub fn multipart(meta: &HttpMetadata) -> Result<Option<Multipart>> {
    if meta.length == 0 || !meta.content_type.is_multipart() {
        return Ok(None);
    }
    let boundary = meta
        .content_type
        .boundary()
        .ok_or_else(|| RequestMapError::Multipart("missing boundary".to_string()))?;
    Multipart::parse(&meta.body, boundary).map(Some)
}

/// Query string values, then form fields: urlencoded body fields, or the
/// text parts of a multipart body.
pub fn query_parameters(meta: &HttpMetadata, parts: Option<&Multipart>) -> Batch {
    let mut batch = Batch::new();
    let Some(params) = meta.params.as_ref() else {
        return batch;
    };
    let text_pairs = |pairs: &Pairs, batch: &mut Batch| {
        for (k, values) in pairs {
            batch.extend(values.iter().map(|v| (k.clone(), Value::from(v.as_str()))));
        }
    };

    text_pairs(&params.query, &mut batch);

    if meta.length > 0 && meta.content_type.is_form_urlencoded() {
        let form = Params::parse_pairs(&String::from_utf8_lossy(&meta.body));
        text_pairs(&form, &mut batch);
    }

    if let Some(parts) = parts {
        batch.extend(
            parts
                .fields
                .iter()
                .map(|(k, v)| (k.clone(), Value::from(v.as_str()))),
        );
    }
    batch
}

/// 上传文件，每个文件作为一个 `Value::Upload`
pub fn uploads(form: Option<Multipart>) -> Batch {
    form.map(|m| {
        m.files
            .into_iter()
            .map(|u| (u.name.clone(), Value::Upload(u)))
            .collect()
    })
    .unwrap_or_default()
}
