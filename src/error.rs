use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 表格（CSV）结构错误
    #[error("表格错误: {0}")]
    Table(#[from] TableError),
    /// 输入数据错误
    #[error("数据错误: {0}")]
    Data(#[from] DataError),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 金标准位置超出每个 hit 的列数
    #[error("金标准位置 {position} 超出范围 [1, {slots}]")]
    GoldPositionOutOfRange { position: usize, slots: usize },
    /// 每个 hit 的列数太少（至少需要一个金标准列和一个普通列）
    #[error("每个 hit 至少需要 2 列, 当前为 {slots}")]
    TooFewSlots { slots: usize },
    /// 每个 hit 需要的工人数不能为 0
    #[error("workers_per_hit 不能为 0")]
    ZeroWorkersPerHit,
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 目标文件已存在且未允许覆盖
    #[error("文件已存在且未开启 overwrite: {path}")]
    AlreadyExists { path: String },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// 表格结构错误
#[derive(Debug, Error)]
pub enum TableError {
    /// 结果文件缺少列
    #[error("缺少列: {column}")]
    MissingColumn { column: String },
    /// 行的列数与 hit 宽度不一致
    #[error("第 {row} 行有 {found} 列, 期望 {expected} 列")]
    ColumnCountMismatch {
        row: usize,
        found: usize,
        expected: usize,
    },
    /// 引用的行号超出表格范围
    #[error("行号 {index} 超出范围 (共 {len} 行)")]
    RowOutOfRange { index: usize, len: usize },
    /// CSV 解析失败
    #[error("CSV解析失败: {source}")]
    Malformed {
        #[source]
        source: csv::Error,
    },
}

/// 输入数据错误
#[derive(Debug, Error)]
pub enum DataError {
    /// 待标注条目为空
    #[error("待标注条目列表为空")]
    EmptyItems,
    /// 金标准池为空
    #[error("金标准列表为空")]
    EmptyGoldPool,
}

// ========== 从常见错误类型转换 ==========

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Table(TableError::Malformed { source: err })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建缺列错误
    pub fn missing_column(column: impl Into<String>) -> Self {
        AppError::Table(TableError::MissingColumn {
            column: column.into(),
        })
    }

    /// 是否属于配置错误（此类错误在产生任何输出之前就应终止）
    pub fn is_config(&self) -> bool {
        matches!(self, AppError::Config(_))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
