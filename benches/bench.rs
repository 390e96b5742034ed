// Criterion benchmarks for SkillPort

use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use skillport::core::{Matcher, calculate_match_score};
use skillport::models::{MatchFilters, Person, Role, ScoringWeights, SessionDuration, SessionFormat};

const SUBJECTS: [&str; 6] = ["math", "rus", "phys", "chem", "eng", "inf"];
const SLOTS: [&str; 8] = ["mon-17", "mon-19", "tue-18", "wed-17", "thu-19", "fri-18", "sat-12", "sun-16"];

fn create_candidate(id: usize) -> Person {
    Person {
        id: format!("p{}", id),
        name: format!("Person {}", id),
        city: "Vladivostok".to_string(),
        school: format!("School No. {}", id % 40),
        about: "Short step-by-step explanations".to_string(),
        role: if id % 3 == 0 { Role::Student } else { Role::Mentor },
        grade: 7 + (id % 5) as u8,
        subjects: vec![SUBJECTS[id % 6].to_string(), SUBJECTS[(id + 2) % 6].to_string()],
        available: (0..3).map(|k| SLOTS[(id + k * 3) % 8].to_string()).collect(),
        rating: (id % 50) as f64 / 10.0,
        reviews_count: (id % 40) as u32,
        points: (id * 37 % 2500) as u32,
        verified: id % 2 == 0,
    }
}

fn create_filters() -> MatchFilters {
    MatchFilters {
        role_needed: Role::Mentor,
        seeker_grade: 8,
        subject_id: "math".to_string(),
        format: SessionFormat::Video,
        duration_min: SessionDuration::Twenty,
        time_ids: vec!["wed-17".to_string(), "sat-12".to_string()],
        only_verified: false,
        query: String::new(),
    }
}

fn bench_score(c: &mut Criterion) {
    let candidate = create_candidate(1);
    let filters = create_filters();
    let weights = ScoringWeights::default();

    c.bench_function("calculate_match_score", |b| {
        b.iter(|| calculate_match_score(black_box(&candidate), black_box(&filters), black_box(&weights)));
    });
}

fn bench_ranking(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let filters = create_filters();

    let mut group = c.benchmark_group("ranking");

    for candidate_count in [10, 50, 100, 500, 1000].iter() {
        let candidates: Vec<Person> = (0..*candidate_count).map(create_candidate).collect();

        group.bench_with_input(
            BenchmarkId::new("rank", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| matcher.rank(black_box(&filters), black_box(&candidates)));
            },
        );
    }

    group.finish();
}

fn bench_query_ranking(c: &mut Criterion) {
    let matcher = Matcher::with_default_weights();
    let filters = MatchFilters {
        query: "school no. 1".to_string(),
        ..create_filters()
    };
    let candidates: Vec<Person> = (0..500).map(create_candidate).collect();

    c.bench_function("rank_with_query_500_candidates", |b| {
        b.iter(|| matcher.rank(black_box(&filters), black_box(&candidates)));
    });
}

criterion_group!(
    benches,
    bench_score,
    bench_ranking,
    bench_query_ranking
);

criterion_main!(benches);
