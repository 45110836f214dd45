use std::borrow::Cow;

use cams_client::ClientError;
use cams_core::ControlError;
use rmcp::ErrorData;
use rmcp::model::ErrorCode;

pub(crate) fn mcp_err(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> ErrorData {
    ErrorData {
        code,
        message: message.into(),
        data: None,
    }
}

/// Maps control-plane failures onto MCP error codes. Resolution misses are
/// resource-not-found; caller mistakes are invalid-params; everything else
/// surfaces as an internal error with the original message intact.
pub(crate) fn map_err(err: ControlError) -> ErrorData {
    let code = match &err {
        ControlError::NotFound { .. } | ControlError::Client(ClientError::NotFound(_)) => {
            ErrorCode::RESOURCE_NOT_FOUND
        }
        ControlError::InvalidArgument(_)
        | ControlError::AmbiguousName { .. }
        | ControlError::DatasetAlreadyAssigned { .. } => ErrorCode::INVALID_PARAMS,
        ControlError::MalformedMetadata(_) | ControlError::Client(_) => ErrorCode::INTERNAL_ERROR,
    };
    mcp_err(code, err.to_string())
}

#[cfg(test)]
mod tests {
    use cams_client::EntityKind;

    use super::*;

    #[test]
    fn resolution_misses_map_to_resource_not_found() {
        let err = map_err(ControlError::NotFound {
            kind: EntityKind::Catalog,
            name: "test".to_string(),
        });
        assert_eq!(err.code, ErrorCode::RESOURCE_NOT_FOUND);
        assert!(err.message.contains("test"));
    }

    #[test]
    fn caller_mistakes_map_to_invalid_params() {
        let err = map_err(ControlError::DatasetAlreadyAssigned {
            datasets: vec!["ds1".to_string()],
        });
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("ds1"));
    }

    #[test]
    fn decode_failures_map_to_internal_error() {
        let err = map_err(ControlError::MalformedMetadata(
            "missing required field 'name'".to_string(),
        ));
        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
    }
}
