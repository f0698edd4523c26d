use title_similarity::{CheckConfig, SimilarityChecker, StopWords, TitleRecord};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct Thesis {
    nim: &'static str,
    author: &'static str,
    year: u16,
}

impl std::fmt::Display for Thesis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {} ({})", self.nim, self.author, self.year)
    }
}

fn main() {
    // RUST_LOG=title_similarity=debug shows the ranking spans
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let records = vec![
        TitleRecord::new(
            "Sistem Pakar Diagnosa Penyakit pada Anjing dengan Metode Forward Chaining",
            Thesis { nim: "15.01.001", author: "Andi", year: 2019 },
        ),
        TitleRecord::new(
            "Sistem Informasi Akademik Berbasis Web",
            Thesis { nim: "16.01.014", author: "Budi", year: 2020 },
        ),
        TitleRecord::new(
            "Simulator Pemrosesan Citra Menggunakan Metode Konvolusi",
            Thesis { nim: "17.01.102", author: "Citra", year: 2021 },
        ),
        TitleRecord::new(
            "Sistem Pakar Diagnosa Penyakit Kucing Berbasis Android",
            Thesis { nim: "18.01.033", author: "Dewi", year: 2022 },
        ),
    ];

    let stopwords = StopWords::parse("dan\ndengan\npada\nuntuk\nyang\nmenggunakan");
    let config = CheckConfig {
        top_k: 3,
        ..CheckConfig::default()
    };
    let checker = match SimilarityChecker::new(config, stopwords) {
        Ok(checker) => checker,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            return;
        }
    };

    let query = "Sistem Pakar untuk Diagnosa Penyakit Anjing";
    let report = checker.check(query, &records);

    println!("Query: {query}");
    println!("Results: \n{}", report);
    if let Some(best) = report.best() {
        println!(
            "closest: {} at {:.1}% ({})",
            best.key,
            best.percent(),
            best.level(&checker.config().thresholds)
        );
    }
}
