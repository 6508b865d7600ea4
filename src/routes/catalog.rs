//! Catalog routes. Parameters travel in the query string or body, never in the path.

use crate::handlers::{
    actor_add_relation, actor_clear_relations, create_actor, create_movie, delete_actor,
    delete_movie, get_actor, get_movie, list_actors, list_movies, movie_add_relation,
    movie_clear_relations, update_actor, update_movie,
};
use crate::state::AppState;
use axum::{routing::get, routing::put, Router};

pub fn catalog_routes(state: AppState) -> Router {
    Router::new()
        .route("/actors", get(list_actors))
        .route(
            "/actor",
            get(get_actor).post(create_actor).put(update_actor).delete(delete_actor),
        )
        .route(
            "/actor-relations",
            put(actor_add_relation).delete(actor_clear_relations),
        )
        .route("/movies", get(list_movies))
        .route(
            "/movie",
            get(get_movie).post(create_movie).put(update_movie).delete(delete_movie),
        )
        .route(
            "/movie-relations",
            put(movie_add_relation).delete(movie_clear_relations),
        )
        .with_state(state)
}
