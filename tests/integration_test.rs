use crowd_rounds::models::loaders::{parse_batch, parse_result_table, render_batch};
use crowd_rounds::models::{FinalLabel, HitLayout};
use crowd_rounds::services::{BatchGenerator, ResultFilter};
use crowd_rounds::{Action, App, AppError, Config, TallyStore};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use tempfile::{tempdir, TempDir};

const SLOTS: usize = 3;
const GOLD_POSITION: usize = 2;

/// 在临时目录中准备条目和金标准文件，返回对应配置
fn setup() -> (TempDir, Config) {
    let temp = tempdir().unwrap();
    let items_file = temp.path().join("video_urls.txt");
    let gold_file = temp.path().join("gold_urls.txt");
    std::fs::write(&items_file, "v1\nv2\n\nv3\nv4\nv5\n").unwrap();
    std::fs::write(&gold_file, "g1\ng2\n").unwrap();

    let config = Config {
        directory: temp.path().join("on").to_string_lossy().to_string(),
        items_file: items_file.to_string_lossy().to_string(),
        gold_file: gold_file.to_string_lossy().to_string(),
        queries_per_hit: SLOTS,
        workers_per_hit: 2,
        gold_standard_position: GOLD_POSITION,
        seed: Some(2024),
        ..Config::default()
    };
    (temp, config)
}

fn layout() -> HitLayout {
    HitLayout::new(SLOTS, GOLD_POSITION, "relation").unwrap()
}

/// 一条提交：展示的条目、每列答案、工人ID
struct Submission<'a> {
    relations: &'a [String],
    answers: [&'a str; SLOTS],
    worker: &'a str,
}

/// 按 MTurk 结果文件格式写出提交
fn write_results(path: &Path, submissions: &[Submission]) {
    let mut writer = csv::Writer::from_path(path).unwrap();
    let mut header = vec!["HITId".to_string(), "AssignmentId".to_string(), "WorkerId".to_string()];
    header.extend((1..=SLOTS).map(|i| format!("Input.relation{}", i)));
    header.extend((1..=SLOTS).map(|i| format!("Answer.value{}", i)));
    writer.write_record(&header).unwrap();

    for (index, submission) in submissions.iter().enumerate() {
        let mut record = vec![
            format!("hit{}", index),
            format!("assignment{}", index),
            submission.worker.to_string(),
        ];
        record.extend(submission.relations.iter().cloned());
        record.extend(submission.answers.iter().map(|a| a.to_string()));
        writer.write_record(&record).unwrap();
    }
    writer.flush().unwrap();
}

fn read_batch(path: &Path, round: usize) -> crowd_rounds::Batch {
    let content = std::fs::read_to_string(path).unwrap();
    parse_batch(&content, round, &layout()).unwrap()
}

#[tokio::test]
async fn test_generate_writes_padded_batch() {
    let (_temp, config) = setup();
    let directory = Path::new(&config.directory).to_path_buf();

    let mut app = App::initialize(config, Action::Generate).await.unwrap();
    let path = app.generate().await.unwrap();
    assert_eq!(path, directory.join("query_round1.csv"));

    let batch = read_batch(&path, 1);
    assert_eq!(batch.header, vec!["relation1", "relation2", "relation3"]);
    // 5 个条目补齐到 6 个，每个 hit 2 个条目
    assert_eq!(batch.len(), 3);
    for hit in &batch.hits {
        assert_eq!(hit.slots.len(), SLOTS);
        assert!(hit.slots[1] == "g1" || hit.slots[1] == "g2");
    }

    assert!(directory.join("run_log.txt").exists());
}

#[tokio::test]
async fn test_generate_refuses_to_replace_existing_batch() {
    let (_temp, config) = setup();

    let mut app = App::initialize(config.clone(), Action::Generate).await.unwrap();
    app.generate().await.unwrap();

    let mut again = App::initialize(config.clone(), Action::Generate).await.unwrap();
    assert!(again.generate().await.is_err());

    let mut forced = App::initialize(
        Config {
            overwrite: true,
            ..config
        },
        Action::Generate,
    )
    .await
    .unwrap();
    assert!(forced.generate().await.is_ok());
}

#[tokio::test]
async fn test_invalid_gold_position_produces_no_output() {
    let (_temp, config) = setup();
    let directory = Path::new(&config.directory).to_path_buf();

    let result = App::initialize(
        Config {
            gold_standard_position: SLOTS + 1,
            ..config
        },
        Action::Generate,
    )
    .await;

    let err = result.err().unwrap();
    assert!(err.downcast_ref::<AppError>().unwrap().is_config());
    assert!(!directory.exists());
}

#[tokio::test]
async fn test_rounds_until_converged() {
    let (_temp, config) = setup();
    let directory = Path::new(&config.directory).to_path_buf();

    // 第 1 轮：生成
    let mut app = App::initialize(config.clone(), Action::Generate).await.unwrap();
    let batch = read_batch(&app.generate().await.unwrap(), 1);

    // 每个 hit 两个工人作答；第一个 hit 的第二个工人没通过金标准
    let mut submissions = Vec::new();
    for (index, hit) in batch.hits.iter().enumerate() {
        submissions.push(Submission {
            relations: &hit.slots,
            answers: ["True", "True", "True"],
            worker: "w_good",
        });
        let gold_answer = if index == 0 { "False" } else { "True" };
        submissions.push(Submission {
            relations: &hit.slots,
            answers: ["True", gold_answer, "True"],
            worker: "w_other",
        });
    }
    write_results(&directory.join("result_round1.csv"), &submissions);

    // 解析第 1 轮：拒绝一条，生成第 2 轮
    let mut app = App::initialize(config.clone(), Action::Parse).await.unwrap();
    let summary = app.replay().await.unwrap();
    assert_eq!(summary.rounds_parsed, vec![1]);
    assert_eq!(summary.rejected_total, 1);
    assert!(!summary.converged);
    assert_eq!(app.coordinator().round(), 2);

    let next_path = summary.next_batch.unwrap();
    assert_eq!(next_path, directory.join("query_round2.csv"));
    let second = read_batch(&next_path, 2);
    assert_eq!(second.hits, vec![batch.hits[0].clone()]);

    let review = std::fs::read_to_string(directory.join("review_round1.csv")).unwrap();
    let review_lines: Vec<&str> = review.lines().collect();
    assert_eq!(review_lines.len(), 1 + submissions.len());
    assert!(review_lines[2].starts_with("1,assignment1,w_other,Reject,"));
    assert!(review_lines[1].contains(",Approve,"));

    // 第 2 轮：重新提交的 hit 被正确作答
    write_results(
        &directory.join("result_round2.csv"),
        &[Submission {
            relations: &second.hits[0].slots,
            answers: ["False", "True", "False"],
            worker: "w_new",
        }],
    );

    // 汇总：从磁盘回放两轮
    let mut app = App::initialize(config.clone(), Action::Finalize).await.unwrap();
    let report = app.finalize().await.unwrap();
    assert_eq!(app.coordinator().round(), 2);
    assert_eq!(report.labels.len(), 5);
    assert!((report.completion_rate - 1.0).abs() < f64::EPSILON);
    for entry in &report.labels {
        assert!(entry.tally.total() >= 2);
        // 平票时 True 优先
        assert_eq!(entry.label, FinalLabel::True);
    }

    let labels: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(directory.join("labels.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(labels["labels"].as_array().unwrap().len(), 5);
    assert_eq!(labels["labels"][0]["item"], "v1");
}

#[tokio::test]
async fn test_parse_without_results_is_noop() {
    let (_temp, config) = setup();

    let mut app = App::initialize(config, Action::Parse).await.unwrap();
    let summary = app.replay().await.unwrap();

    assert!(summary.rounds_parsed.is_empty());
    assert!(summary.next_batch.is_none());
    assert_eq!(app.coordinator().round(), 1);
}

#[test]
fn test_batch_file_reads_back_as_results() {
    // 金标准在最后一列
    let layout = HitLayout::new(4, 4, "relation").unwrap();
    let items: Vec<String> = (1..=7).map(|i| format!("v{}", i)).collect();
    let gold = vec!["g1".to_string()];
    let mut rng = StdRng::seed_from_u64(7);

    let batch = BatchGenerator::new(layout.clone())
        .generate(&items, &gold, 1, &mut rng)
        .unwrap();
    let rendered = render_batch(&batch).unwrap();

    // 按 MTurk 的方式把批次文件的每一行变成一条未作答的提交
    let mut reader = csv::Reader::from_reader(rendered.as_slice());
    let mut writer = csv::Writer::from_writer(Vec::new());
    let mut header: Vec<String> = reader
        .headers()
        .unwrap()
        .iter()
        .map(|column| format!("Input.{}", column))
        .collect();
    header.extend((1..=4).map(|i| format!("Answer.value{}", i)));
    writer.write_record(&header).unwrap();
    for record in reader.records() {
        let mut fields: Vec<String> = record.unwrap().iter().map(str::to_string).collect();
        fields.extend(std::iter::repeat(String::new()).take(4));
        writer.write_record(&fields).unwrap();
    }
    let content = String::from_utf8(writer.into_inner().unwrap()).unwrap();

    let table = parse_result_table(&content, &layout).unwrap();
    assert_eq!(table.len(), batch.len());
    for (hit, row) in batch.hits.iter().zip(&table.rows) {
        let placed: Vec<&str> = hit.items(&layout).collect();
        let read_back: Vec<&str> = row.relations[..3].iter().map(String::as_str).collect();
        assert_eq!(placed, read_back);
        assert_eq!(row.relations[3], "g1");
    }

    // 空答案算作 Unclear：没有拒绝，每行计入 3 票
    let mut tallies = TallyStore::new(&items);
    let outcome = ResultFilter::new(layout, &gold)
        .parse_round(&table, 1, &mut tallies)
        .unwrap();
    assert!(!outcome.has_rejections());
    assert_eq!(outcome.votes_recorded, table.len() * 3);
}
