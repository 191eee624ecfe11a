use tracing::debug;

use crate::{
    config::RequestMapConfig,
    error::Result,
    http::{body::BodyDecoders, meta::HttpMetadata, sources},
    map::{RequestMap, build},
};

/// Resolves the unified parameter map of a routed request.
///
/// Holds only read-only decoders, so one instance can serve every request
/// concurrently.
#[derive(Debug, Clone, Default)]
pub struct RequestMapResolver {
    decoders: BodyDecoders,
}

impl RequestMapResolver {
    pub fn new(decoders: BodyDecoders) -> Self {
        Self { decoders }
    }

    pub fn decoders(&self) -> &BodyDecoders {
        &self.decoders
    }

    /// 路径参数 -> 查询/表单参数 -> 上传文件 -> body，任一来源失败则整体失败
    pub fn resolve(&self, meta: &HttpMetadata, config: &RequestMapConfig) -> Result<RequestMap> {
        let path = sources::path_variables(meta)?;
        let form = sources::multipart(meta)?;
        let query = sources::query_parameters(meta, form.as_ref());
        let uploads = sources::uploads(form);
        let body = self.decoders.decode(meta)?;

        debug!(
            method = %meta.method,
            path = %meta.path,
            path_vars = path.len(),
            query = query.len(),
            uploads = uploads.len(),
            body = body.len(),
            "collected parameter sources"
        );

        build([path, query, uploads, body], config)
    }
}
