use client::ApiError;
use shared::{BookQuery, BookSummary, Category};
use yew::prelude::*;
use yew_hooks::prelude::*;

use crate::components::atoms::error_alert::ErrorAlert;
use crate::components::atoms::loading_spinner::LoadingSpinner;
use crate::components::atoms::select::{Select, SelectOption};
use crate::components::composite::book_card::BookCard;
use crate::session_context::use_session;

const PAGE_LIMIT: u32 = 100;
const ALL_CATEGORIES: &str = "";

fn category_options(categories: &[Category]) -> Vec<SelectOption> {
    std::iter::once(SelectOption::new(ALL_CATEGORIES, "All categories"))
        .chain(
            categories
                .iter()
                .map(|category| SelectOption::new(category.id.to_string(), &category.name)),
        )
        .collect()
}

#[function_component(BooksPage)]
pub fn books_page() -> Html {
    let context = use_session();
    let category_filter = use_state(|| Option::<i64>::None);

    let categories = {
        let gateway = context.client.gateway.clone();
        use_async_with_options(
            async move { gateway.list_categories().await },
            UseAsyncOptions::enable_auto(),
        )
    };

    let books = {
        let gateway = context.client.gateway.clone();
        let query = BookQuery {
            category_id: *category_filter,
            skip: None,
            limit: Some(PAGE_LIMIT),
        };
        use_async(async move {
            gateway.list_books(&query).await.inspect_err(|error| {
                log::warn!("Fail to load books, error: {error}");
            })
        })
    };

    {
        let books = books.clone();
        use_effect_with(*category_filter, move |_| books.run());
    }

    let on_category_change = {
        let category_filter = category_filter.clone();
        Callback::from(move |value: String| {
            category_filter.set(value.parse::<i64>().ok());
        })
    };

    let selected = category_filter
        .map(|id| id.to_string())
        .unwrap_or_else(|| ALL_CATEGORIES.to_owned());
    let options = categories
        .data
        .as_deref()
        .map(category_options)
        .unwrap_or_else(|| category_options(&[]));

    html! {
        <div class="container mt-4">
            <div class="d-flex justify-content-between align-items-center mb-4">
                <h1>{"Catalog"}</h1>
                <div style="min-width: 250px;">
                    <Select
                        id="category-filter"
                        name="category"
                        class="form-select"
                        options={options}
                        selected={selected}
                        on_change={on_category_change} />
                </div>
            </div>
            {render_books(books.loading, books.data.as_deref(), books.error.as_ref())}
        </div>
    }
}

fn render_books(
    loading: bool,
    books: Option<&[BookSummary]>,
    error: Option<&ApiError>,
) -> Html {
    if loading || (books.is_none() && error.is_none()) {
        return html! { <LoadingSpinner /> };
    }
    if let Some(error) = error {
        return html! { <ErrorAlert message={error.user_message()} /> };
    }
    match books {
        Some(books) if !books.is_empty() => html! {
            <div class="row row-cols-1 row-cols-md-3 g-4">
                { for books.iter().map(|book| html! { <BookCard key={book.id.to_string()} book={book.clone()} /> }) }
            </div>
        },
        _ => html! {
            <div class="text-center py-5">
                <h5>{"No books found"}</h5>
            </div>
        },
    }
}
