use crate::errors::ApiError;
use crate::models::file_metadata::NewFileMetadata;
use crate::repositories::{FileMetadataRepository, RepositoryError};
use crate::requests::query::ListQuery;
use crate::storage::{FilesStorage, extension_of};
use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use futures_util::TryStreamExt as _;
use log::{error, info, warn};

/// Name given to uploads whose multipart part carries no filename.
const FALLBACK_FILENAME: &str = "file";

struct Upload {
    filename: String,
    contents: Vec<u8>,
}

/// Runs a repository call on the blocking thread pool.
async fn run_blocking<F, T>(
    repo: &web::Data<dyn FileMetadataRepository>,
    call: F,
) -> Result<T, RepositoryError>
where
    F: FnOnce(&dyn FileMetadataRepository) -> Result<T, RepositoryError> + Send + 'static,
    T: Send + 'static,
{
    let repo = repo.clone();
    web::block(move || call(repo.get_ref()))
        .await
        .map_err(|_| RepositoryError::Blocking)?
}

/// Reads the `file` part (or the first part with a filename) fully into memory.
/// Parts with an empty filename carry no file and are skipped.
async fn read_upload(payload: &mut Multipart) -> Result<Upload, ApiError> {
    let invalid = |e: actix_multipart::MultipartError| {
        warn!("Invalid multipart payload: {}", e);
        ApiError::InvalidMultipart
    };

    while let Some(mut field) = payload.try_next().await.map_err(invalid)? {
        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string);
        // An empty file input is submitted as `filename=""`.
        if filename.as_deref() == Some("") {
            continue;
        }
        if field.name() != Some("file") && filename.is_none() {
            continue;
        }

        let mut contents = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(invalid)? {
            contents.extend_from_slice(&chunk);
        }

        return Ok(Upload {
            filename: filename.unwrap_or_else(|| FALLBACK_FILENAME.to_string()),
            contents,
        });
    }

    Err(ApiError::MissingFile)
}

/// POST /upload-document/
/// Stores the uploaded file under a generated name and records its metadata.
pub async fn upload_document(
    repo: web::Data<dyn FileMetadataRepository>,
    storage: web::Data<FilesStorage>,
    mut payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    let upload = read_upload(&mut payload).await?;
    let extension = extension_of(&upload.filename);

    let stored = storage
        .save(&upload.contents, &extension)
        .await
        .map_err(|e| {
            error!("Error uploading file {}: {}", upload.filename, e);
            ApiError::Upload
        })?;
    info!(
        "Successfully saved file: {} from original: {}",
        stored.system_filename, upload.filename
    );

    let new_meta = NewFileMetadata {
        original_filename: upload.filename,
        system_filename: stored.system_filename.clone(),
        file_size_bytes: stored.size_bytes as i64,
    };

    match run_blocking(&repo, move |repo| repo.create(&new_meta)).await {
        Ok(record) => {
            info!("Successfully created metadata for file ID: {}", record.id);
            Ok(HttpResponse::Ok().json(record))
        }
        Err(e) => {
            error!(
                "Error creating metadata for file {}: {}",
                stored.system_filename, e
            );
            if let Err(e) = storage.remove(&stored.system_filename).await {
                warn!(
                    "Could not remove orphaned file {}: {}",
                    stored.system_filename, e
                );
            }
            Err(ApiError::Upload)
        }
    }
}

/// GET /files/?skip=&limit=
/// Returns a page of file metadata records.
pub async fn list_files(
    repo: web::Data<dyn FileMetadataRepository>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, ApiError> {
    info!("Request received for /files/ endpoint");
    let skip = i64::from(query.skip);
    let limit = i64::from(query.limit);

    let files = run_blocking(&repo, move |repo| repo.list(skip, limit))
        .await
        .map_err(|e| {
            error!("Error retrieving files from database: {}", e);
            ApiError::Listing
        })?;

    info!("Returning {} file metadata records.", files.len());
    Ok(HttpResponse::Ok().json(files))
}
