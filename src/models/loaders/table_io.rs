//! 批次文件与结果文件的 CSV 读写

use crate::error::{AppError, AppResult, FileError};
use crate::models::answer::Answer;
use crate::models::batch::{Batch, Hit, HitLayout};
use crate::models::result_table::{ResultRow, ResultTable};
use std::path::Path;
use tokio::fs;

/// 把批次序列化为 CSV 字节
pub fn render_batch(batch: &Batch) -> AppResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&batch.header)?;
    for hit in &batch.hits {
        writer.write_record(&hit.slots)?;
    }
    writer.flush()?;
    writer.into_inner().map_err(|e| AppError::from(e.into_error()))
}

/// 写出批次文件（已存在时直接覆盖，是否允许覆盖由调用方决定）
pub async fn write_batch(path: &Path, batch: &Batch) -> AppResult<()> {
    let bytes = render_batch(batch)?;
    fs::write(path, bytes)
        .await
        .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

    tracing::debug!("写入批次文件: {} ({} 个 hit)", path.display(), batch.len());
    Ok(())
}

/// 解析批次文件内容
pub fn parse_batch(content: &str, round: usize, layout: &HitLayout) -> AppResult<Batch> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(content.as_bytes());

    let header: Vec<String> = reader.headers()?.iter().map(String::from).collect();
    let mut hits = Vec::new();
    for record in reader.records() {
        let record = record?;
        hits.push(Hit::new(record.iter().map(String::from).collect()));
    }

    let batch = Batch { round, header, hits };
    batch.check_shape(layout)?;
    Ok(batch)
}

/// 解析结果文件内容
///
/// 必须包含 `Input.{prefix}{i}` 与 `Answer.value{i}` 两组列（i 为 1..=slots_per_row），
/// `AssignmentId` / `WorkerId` 可选。
pub fn parse_result_table(content: &str, layout: &HitLayout) -> AppResult<ResultTable> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let find = |name: &str| headers.iter().position(|h| h == name);

    let mut relation_columns = Vec::with_capacity(layout.slots_per_row());
    let mut answer_columns = Vec::with_capacity(layout.slots_per_row());
    for position in 1..=layout.slots_per_row() {
        let relation = layout.input_column(position);
        let answer = layout.answer_column(position);
        relation_columns.push(find(&relation).ok_or_else(|| AppError::missing_column(relation))?);
        answer_columns.push(find(&answer).ok_or_else(|| AppError::missing_column(answer))?);
    }
    let assignment_column = find("AssignmentId");
    let worker_column = find("WorkerId");

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let field = |index: usize| record.get(index).unwrap_or("").to_string();

        let relations: Vec<String> = relation_columns.iter().map(|&i| field(i)).collect();
        let raw_answers: Vec<String> = answer_columns.iter().map(|&i| field(i)).collect();
        let answers = raw_answers.iter().map(|raw| Answer::decode(raw)).collect();

        rows.push(ResultRow {
            relations,
            answers,
            raw_answers,
            assignment_id: assignment_column.map(field),
            worker_id: worker_column.map(field),
        });
    }

    Ok(ResultTable::new(rows))
}

/// 读取结果文件
pub async fn read_result_table(path: &Path, layout: &HitLayout) -> AppResult<ResultTable> {
    if !fs::try_exists(path).await.unwrap_or(false) {
        return Err(FileError::NotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    parse_result_table(&content, layout)
}
