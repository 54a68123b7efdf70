use clubsite_content_engine::models::{ArticleId, ArticleRecord, ClubRef, TemplateKind};

pub fn sample_record(kind: TemplateKind) -> ArticleRecord {
    ArticleRecord {
        id: ArticleId::parse("spring-open").unwrap(),
        title: "Spring open".to_string(),
        date: chrono::NaiveDate::from_ymd_opt(2025, 5, 3).unwrap(),
        club: ClubRef {
            id: "club-1".to_string(),
            name: "Riverside Kendo".to_string(),
        },
        cover_image_url: None,
        template_kind: kind,
        custom_route_key: None,
        published: true,
    }
}
