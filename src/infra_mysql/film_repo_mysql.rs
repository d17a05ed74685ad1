use super::util::*;
use crate::domain_model::*;
use crate::domain_port::*;
use sqlx::{MySqlPool, Row};

pub struct MySqlFilmRepo {
    pool: MySqlPool,
    retry: RetryPolicy,
}

impl MySqlFilmRepo {
    pub fn new(pool: MySqlPool, retry: RetryPolicy) -> Self {
        MySqlFilmRepo { pool, retry }
    }

    async fn genres_of(&self, film_id: FilmId) -> Result<Vec<Genre>, StoreError> {
        let rows = with_retry(self.retry, "select film genres", move || {
            sqlx::query(
                r#"
SELECT g.genre_id, g.name
FROM film_genres fg
JOIN genres g ON g.genre_id = fg.genre_id
WHERE fg.film_id = ?
ORDER BY g.genre_id
"#,
            )
            .bind(film_id)
            .fetch_all(&self.pool)
        })
        .await
        .map_err(|e| to_store_error("select film genres", e))?;

        rows.iter()
            .map(|r| {
                Ok(Genre {
                    id: r.try_get("genre_id")?,
                    name: r.try_get("name")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(|e| to_store_error("decode genre", e))
    }
}

#[async_trait::async_trait]
impl FilmRepo for MySqlFilmRepo {
    async fn insert(&self, mut film: NewFilm) -> Result<Film, StoreError> {
        film.genres.sort_by_key(|g| g.id);
        film.genres.dedup_by_key(|g| g.id);

        let store_err = |e: sqlx::Error| to_store_error("insert film", e);
        let mut tx = self.pool.begin().await.map_err(store_err)?;

        let res = sqlx::query(
            r#"
INSERT INTO films (name, description, release_date, duration, mpa_id)
VALUES (?, ?, ?, ?, ?)
"#,
        )
        .bind(&film.name)
        .bind(&film.description)
        .bind(film.release_date)
        .bind(film.duration)
        .bind(film.mpa.as_ref().map(|m| m.id))
        .execute(&mut *tx)
        .await
        .map_err(store_err)?;
        let film_id = FilmId(res.last_insert_id() as i64);

        for genre in &film.genres {
            sqlx::query("INSERT INTO film_genres (film_id, genre_id) VALUES (?, ?)")
                .bind(film_id)
                .bind(genre.id)
                .execute(&mut *tx)
                .await
                .map_err(store_err)?;
        }

        tx.commit().await.map_err(store_err)?;

        self.get(film_id)
            .await?
            .ok_or_else(|| StoreError::Corrupt(format!("film {film_id} vanished after insert")))
    }

    async fn exists(&self, film_id: FilmId) -> Result<bool, StoreError> {
        let count: i64 = with_retry(self.retry, "film exists", move || {
            sqlx::query_scalar("SELECT COUNT(1) FROM films WHERE film_id = ?")
                .bind(film_id)
                .fetch_one(&self.pool)
        })
        .await
        .map_err(|e| to_store_error("film exists", e))?;

        Ok(count > 0)
    }

    async fn get(&self, film_id: FilmId) -> Result<Option<Film>, StoreError> {
        let row = with_retry(self.retry, "select film", move || {
            sqlx::query(
                r#"
SELECT f.film_id, f.name, f.description, f.release_date, f.duration,
       m.mpa_id, m.name AS mpa_name
FROM films f
LEFT JOIN mpa m ON m.mpa_id = f.mpa_id
WHERE f.film_id = ?
"#,
            )
            .bind(film_id)
            .fetch_optional(&self.pool)
        })
        .await
        .map_err(|e| to_store_error("select film", e))?;

        let Some(r) = row else {
            return Ok(None);
        };

        let decode = || -> Result<Film, sqlx::Error> {
            let mpa_id: Option<i32> = r.try_get("mpa_id")?;
            let mpa_name: Option<String> = r.try_get("mpa_name")?;
            let duration: u32 = r.try_get("duration")?;
            Ok(Film {
                id: r.try_get("film_id")?,
                name: r.try_get("name")?,
                description: r.try_get("description")?,
                release_date: r.try_get("release_date")?,
                duration,
                mpa: mpa_id.zip(mpa_name).map(|(id, name)| Mpa { id, name }),
                genres: Vec::new(),
                likes: Vec::new(),
            })
        };
        let mut film = decode().map_err(|e| to_store_error("decode film", e))?;
        film.genres = self.genres_of(film_id).await?;

        Ok(Some(film))
    }
}
