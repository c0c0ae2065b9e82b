use actix_web::web;

pub mod files;
pub mod health;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::read_root))
        .route("/upload-document/", web::post().to(files::upload_document))
        .route("/files/", web::get().to(files::list_files));
}
