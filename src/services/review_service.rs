use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::review::Review;
use crate::models::user::ROLE_COMPANY;

#[derive(Clone)]
pub struct ReviewService {
    pool: PgPool,
}

pub struct CompanyReviews {
    pub items: Vec<Review>,
    pub average_rating: Option<f64>,
}

impl ReviewService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        author_id: Uuid,
        company_id: Uuid,
        rating: i32,
        comment: Option<String>,
    ) -> Result<Review> {
        let company: (String,) = sqlx::query_as("SELECT role FROM users WHERE id = $1")
            .bind(company_id)
            .fetch_one(&self.pool)
            .await?;
        if company.0 != ROLE_COMPANY {
            return Err(Error::BadRequest("Reviews can only target companies".into()));
        }

        let existing = sqlx::query("SELECT id FROM reviews WHERE author_id = $1 AND company_id = $2")
            .bind(author_id)
            .bind(company_id)
            .fetch_optional(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(Error::Conflict("You already reviewed this company".into()));
        }

        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (author_id, company_id, rating, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(author_id)
        .bind(company_id)
        .bind(rating)
        .bind(&comment)
        .fetch_one(&self.pool)
        .await?;
        Ok(review)
    }

    pub async fn for_company(&self, company_id: Uuid) -> Result<CompanyReviews> {
        let items = sqlx::query_as::<_, Review>(
            r#"
            SELECT * FROM reviews
            WHERE company_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        let average: (Option<f64>,) =
            sqlx::query_as("SELECT AVG(rating)::float8 FROM reviews WHERE company_id = $1")
                .bind(company_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(CompanyReviews {
            items,
            average_rating: average.0,
        })
    }
}
