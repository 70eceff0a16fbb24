use actix_web::{web, App, HttpServer, Result, HttpResponse, middleware::Logger};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::net::UdpSocket;
use rayon::prelude::*;
use crate::config::{SearchOptions, ServerConfig};
use crate::query_cache::QueryCache;
use crate::search_terms;

#[derive(Deserialize)]
pub struct NormalizeRequest {
    pub query: String,
    pub stop_words: Option<String>, // якщо не задано, беремо список з конфігурації
}

#[derive(Deserialize)]
pub struct BatchNormalizeRequest {
    pub queries: Vec<String>,
    pub stop_words: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NormalizeResponse {
    pub query: String,
    pub terms: Vec<String>,
    pub normalized: String,
    pub processing_time_ms: u128,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct BatchNormalizeResponse {
    pub results: Vec<NormalizeResponse>,
    pub count: usize,
    pub processing_time_ms: u128,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ConfigResponse {
    pub stop_words: String,
    pub options: SearchOptions,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CacheStatsResponse {
    pub entries: usize,
    pub capacity: usize,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

pub struct AppState {
    pub stop_words: String,
    pub options: SearchOptions,
    pub query_cache: Arc<QueryCache>,
}

impl AppState {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            stop_words: config.stop_words.clone(),
            options: config.options.clone(),
            query_cache: Arc::new(QueryCache::new(config.cache_capacity)),
        }
    }

    /// Обробляє запит; для списку стоп-фраз з конфігурації використовує кеш
    fn normalize(&self, query: &str, stop_words: Option<&str>) -> Vec<String> {
        match stop_words {
            Some(stop_words) if stop_words != self.stop_words => {
                search_terms(query, stop_words, &self.options)
            }
            _ => self.query_cache.get_or_compute(query, || {
                search_terms(query, &self.stop_words, &self.options)
            }),
        }
    }
}

// Функція для отримання локальної IP-адреси
fn get_local_ip() -> Option<String> {
    // Створюємо UDP-сокет для з'єднання (без реальної відправки даних)
    // Це дозволяє ОС визначити правильний мережевий інтерфейс
    let socket = UdpSocket::bind("0.0.0.0:0").ok()?;
    socket.connect("8.8.8.8:80").ok()?;
    socket.local_addr().ok().map(|addr| addr.ip().to_string())
}

fn build_response(query: &str, terms: Vec<String>, start_time: std::time::Instant) -> NormalizeResponse {
    NormalizeResponse {
        query: query.to_string(),
        normalized: terms.join(" "),
        terms,
        processing_time_ms: start_time.elapsed().as_millis(),
    }
}

pub async fn normalize_handler(
    data: web::Data<AppState>,
    request: web::Json<NormalizeRequest>,
) -> Result<HttpResponse> {
    let start_time = std::time::Instant::now();

    if request.query.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse {
            error: "Порожній запит пошуку".to_string(),
        }));
    }

    let terms = data.normalize(&request.query, request.stop_words.as_deref());
    Ok(HttpResponse::Ok().json(build_response(&request.query, terms, start_time)))
}

pub async fn normalize_batch_handler(
    data: web::Data<AppState>,
    request: web::Json<BatchNormalizeRequest>,
) -> Result<HttpResponse> {
    let start_time = std::time::Instant::now();

    if request.queries.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ErrorResponse {
            error: "Порожній список запитів".to_string(),
        }));
    }

    let stop_words = request.stop_words.as_deref();

    // Запити обробляються паралельно, порядок результатів зберігається
    let results: Vec<NormalizeResponse> = request
        .queries
        .par_iter()
        .map(|query| {
            let item_start = std::time::Instant::now();
            let terms = data.normalize(query, stop_words);
            build_response(query, terms, item_start)
        })
        .collect();

    let response = BatchNormalizeResponse {
        count: results.len(),
        results,
        processing_time_ms: start_time.elapsed().as_millis(),
    };

    Ok(HttpResponse::Ok().json(response))
}

pub async fn config_handler(data: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ConfigResponse {
        stop_words: data.stop_words.clone(),
        options: data.options.clone(),
    }))
}

pub async fn cache_stats_handler(data: web::Data<AppState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(CacheStatsResponse {
        entries: data.query_cache.len(),
        capacity: data.query_cache.capacity(),
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/normalize", web::post().to(normalize_handler))
        .route("/api/normalize-batch", web::post().to(normalize_batch_handler))
        .route("/api/config", web::get().to(config_handler))
        .route("/api/cache-stats", web::get().to(cache_stats_handler));
}

pub async fn start_web_server(config: ServerConfig) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState::from_config(&config));

    if config.stop_words.trim().is_empty() {
        println!("⚠️  Список стоп-фраз порожній: усі запити без власного списку повертатимуть порожній результат");
    }

    println!("Запуск веб-сервера на http://{}", config.bind);

    // Виводимо актуальну локальну IP-адресу
    if let Some(local_ip) = get_local_ip() {
        println!("Доступ з локальної мережі: http://{}", local_ip);
    } else {
        println!("⚠️  Не вдалося визначити локальну IP-адресу");
    }

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(Logger::default())
            .configure(configure_routes)
    })
        .bind(&config.bind)?
        .run()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    fn state(stop_words: &str) -> web::Data<AppState> {
        let config = ServerConfig {
            stop_words: stop_words.to_string(),
            options: SearchOptions::new(0, true, true),
            ..ServerConfig::default()
        };
        web::Data::new(AppState::from_config(&config))
    }

    #[actix_web::test]
    async fn test_normalize_endpoint() {
        let data = state("купить");
        let app = test::init_service(App::new().app_data(data.clone()).configure(configure_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/normalize")
            .set_json(serde_json::json!({ "query": "купить красивые книги" }))
            .to_request();
        let response: NormalizeResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(response.terms, vec!["красив", "книг"]);
        assert_eq!(response.normalized, "красив книг");
        assert_eq!(data.query_cache.len(), 1);
    }

    #[actix_web::test]
    async fn test_cached_exact_phrase_keeps_space() {
        let data = state("zzz");
        let app = test::init_service(App::new().app_data(data.clone()).configure(configure_routes)).await;

        for _ in 0..2 {
            let req = test::TestRequest::post()
                .uri("/api/normalize")
                .set_json(serde_json::json!({ "query": "\"rust lang\" книги" }))
                .to_request();
            let response: NormalizeResponse = test::call_and_read_body_json(&app, req).await;
            assert_eq!(response.terms, vec!["rust lang", "книг"]);
        }
        assert_eq!(data.query_cache.len(), 1);
    }

    #[actix_web::test]
    async fn test_cached_phrase_with_control_character() {
        let data = state("zzz");
        let app = test::init_service(App::new().app_data(data.clone()).configure(configure_routes)).await;

        for _ in 0..2 {
            let req = test::TestRequest::post()
                .uri("/api/normalize")
                .set_json(serde_json::json!({ "query": "\"rust\u{1f}lang\" книги" }))
                .to_request();
            let response: NormalizeResponse = test::call_and_read_body_json(&app, req).await;
            assert_eq!(response.terms, vec!["rust\u{1f}lang", "книг"]);
        }
    }

    #[actix_web::test]
    async fn test_batch_fills_cache() {
        let data = state("zzz");
        let app = test::init_service(App::new().app_data(data.clone()).configure(configure_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/normalize-batch")
            .set_json(serde_json::json!({ "queries": ["книги", "столы", "книги"] }))
            .to_request();
        let response: BatchNormalizeResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(response.results[0].terms, response.results[2].terms);
        assert_eq!(data.query_cache.len(), 2);
    }

    #[actix_web::test]
    async fn test_custom_stop_words_bypass_cache() {
        let data = state("купить");
        let app = test::init_service(App::new().app_data(data.clone()).configure(configure_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/normalize")
            .set_json(serde_json::json!({ "query": "купить книги", "stop_words": "книги" }))
            .to_request();
        let response: NormalizeResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(response.terms, vec!["куп"]);
        assert!(data.query_cache.is_empty());
    }

    #[actix_web::test]
    async fn test_empty_query_rejected() {
        let app = test::init_service(App::new().app_data(state("zzz")).configure(configure_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/normalize")
            .set_json(serde_json::json!({ "query": "   " }))
            .to_request();
        let response = test::call_service(&app, req).await;

        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_batch_preserves_order() {
        let app = test::init_service(App::new().app_data(state("zzz")).configure(configure_routes)).await;

        let req = test::TestRequest::post()
            .uri("/api/normalize-batch")
            .set_json(serde_json::json!({ "queries": ["книгами", "бвгд", "a"] }))
            .to_request();
        let response: BatchNormalizeResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(response.count, 3);
        assert_eq!(response.results[0].normalized, "книг");
        assert_eq!(response.results[1].normalized, "бвгд");
        assert_eq!(response.results[2].normalized, "");
    }

    #[actix_web::test]
    async fn test_config_endpoint() {
        let app = test::init_service(App::new().app_data(state("купить, цена")).configure(configure_routes)).await;

        let req = test::TestRequest::get().uri("/api/config").to_request();
        let response: ConfigResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(response.stop_words, "купить, цена");
        assert!(response.options.stemmer);
    }
}
