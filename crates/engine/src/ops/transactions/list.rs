use sea_orm::{PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, Page, PageRequest, ResultEngine, TransactionDetail, TransactionListFilter,
    transactions,
};

use super::super::{Engine, with_tx};

fn validate_list_filter(filter: &TransactionListFilter) -> ResultEngine<PageRequest> {
    if let (Some(start), Some(end)) = (filter.start_date, filter.end_date)
        && start > end
    {
        return Err(EngineError::InvalidArgument(
            "invalid range: start_date must be <= end_date".to_string(),
        ));
    }
    PageRequest::new(filter.page, filter.limit)
}

trait ApplyTxFilters: QueryFilter + Sized {
    fn apply_tx_filters(self, filter: &TransactionListFilter) -> Self;
}

impl<T> ApplyTxFilters for T
where
    T: QueryFilter + Sized,
{
    fn apply_tx_filters(mut self, filter: &TransactionListFilter) -> Self {
        if let Some(category_id) = filter.category_id {
            self = self.filter(transactions::Column::CategoryId.eq(category_id));
        }
        if let Some(sub_category_id) = filter.sub_category_id {
            self = self.filter(transactions::Column::SubCategoryId.eq(sub_category_id));
        }
        if let Some(kind) = filter.transaction_type {
            self = self.filter(transactions::Column::TransactionType.eq(kind.as_str()));
        }
        if let Some(start) = filter.start_date {
            self = self.filter(transactions::Column::TransactionDate.gte(start));
        }
        if let Some(end) = filter.end_date {
            self = self.filter(transactions::Column::TransactionDate.lte(end));
        }
        self
    }
}

impl Engine {
    /// Lists the caller's transactions, one page at a time.
    ///
    /// Ordering is `(transaction_date ASC, id ASC)`. Count and page are read
    /// in the same scope, so `total_records` matches the returned window.
    pub async fn list_transactions(
        &self,
        user_id: Uuid,
        filter: &TransactionListFilter,
    ) -> ResultEngine<Page<TransactionDetail>> {
        let request = validate_list_filter(filter)?;

        with_tx!(self, |db_tx| {
            let query = transactions::Entity::find()
                .filter(transactions::Column::UserId.eq(user_id.to_string()))
                .apply_tx_filters(filter);

            let total = query.clone().count(&db_tx).await?;
            let models = query
                .order_by_asc(transactions::Column::TransactionDate)
                .order_by_asc(transactions::Column::Id)
                .offset(request.offset())
                .limit(request.limit)
                .all(&db_tx)
                .await?;

            let records = self.transaction_details(&db_tx, models).await?;
            Ok(Page::new(total, request, records))
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn reversed_range_is_rejected() {
        let filter = TransactionListFilter::default().between(
            NaiveDate::from_ymd_opt(2024, 3, 1),
            NaiveDate::from_ymd_opt(2024, 2, 1),
        );
        assert!(matches!(
            validate_list_filter(&filter),
            Err(EngineError::InvalidArgument(_))
        ));
    }

    #[test]
    fn single_day_range_is_allowed() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1);
        let filter = TransactionListFilter::default().between(day, day);
        assert_eq!(validate_list_filter(&filter).unwrap(), PageRequest::default());
    }
}
