use thiserror::Error;

/// 应用程序错误类型
///
/// 核心流程（解析 → 过滤 → 生成）不会产生错误，这里只覆盖边缘：
/// 输入校验、数据集加载、配置、超时。
#[derive(Debug, Error)]
pub enum AppError {
    /// 请求文本校验失败
    #[error("{0}")]
    Validation(#[from] ValidationError),
    /// 数据集加载错误
    #[error("데이터셋 오류: {0}")]
    Dataset(#[from] DatasetError),
    /// 配置错误
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 请求处理超时
    #[error("요청 처리 시간이 초과되었습니다 ({secs}초)")]
    Timeout { secs: u64 },
    /// 后台任务异常退出
    #[error("작업 실행 실패: {0}")]
    Task(String),
}

/// 请求文本校验错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("입력 텍스트가 필요합니다.")]
    EmptyInput,
    #[error("입력 텍스트가 너무 깁니다 ({len}자, 최대 {max}자)")]
    TooLong { len: usize, max: usize },
}

/// 数据集错误
#[derive(Debug, Error)]
pub enum DatasetError {
    /// 文件不存在
    #[error("파일을 찾을 수 없습니다: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("파일 읽기 실패 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML 파싱 실패 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 表头缺少必需的列
    #[error("필수 열이 없습니다: {column}")]
    MissingColumn { column: String },
    /// 无法识别的文件类型
    #[error("지원하지 않는 데이터 형식입니다: {path}")]
    UnsupportedFormat { path: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件读取失败
    #[error("설정 파일 읽기 실패 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 配置文件解析失败
    #[error("설정 파일 파싱 실패 ({path}): {source}")]
    ParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 环境变量解析失败
    #[error("환경 변수 {var_name} 값 '{value}'을(를) {expected_type}(으)로 변환할 수 없습니다")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn dataset_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Dataset(DatasetError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 是否为调用方输入错误（对应 HTTP 400 一类的响应）
    pub fn is_client_error(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
