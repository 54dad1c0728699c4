use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 请求校验错误
    #[error("校验错误: {0}")]
    Validation(#[from] ValidationError),
    /// 请求负载错误
    #[error("负载错误: {0}")]
    Payload(#[from] PayloadError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
}

/// 请求校验错误
#[derive(Debug, Error)]
pub enum ValidationError {
    /// 待评估的创意列表为空
    #[error("No ideas provided for evaluation")]
    EmptyIdeasList,
}

/// 请求负载错误
#[derive(Debug, Error)]
pub enum PayloadError {
    /// 未注册的操作名
    #[error("未知操作: {operation}")]
    UnknownOperation { operation: String },
    /// 负载无法解析为对应的请求类型
    #[error("无法解析操作 {operation} 的负载: {source}")]
    Invalid {
        operation: String,
        #[source]
        source: serde_json::Error,
    },
    /// 结果序列化失败
    #[error("结果序列化失败: {0}")]
    Serialization(#[source] serde_json::Error),
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

impl AppError {
    /// 返回稳定的机器可读错误码，随失败响应一起下发
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(ValidationError::EmptyIdeasList) => "empty_ideas_list",
            AppError::Payload(PayloadError::UnknownOperation { .. }) => "unknown_operation",
            AppError::Payload(PayloadError::Invalid { .. }) => "invalid_payload",
            AppError::Payload(PayloadError::Serialization(_)) => "serialization_failed",
            AppError::File(_) => "file_error",
        }
    }

    /// 创建负载解析错误
    pub fn invalid_payload(operation: impl Into<String>, source: serde_json::Error) -> Self {
        AppError::Payload(PayloadError::Invalid {
            operation: operation.into(),
            source,
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }
}

// ========== 从常见错误类型转换 ==========

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Payload(PayloadError::Serialization(err))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
