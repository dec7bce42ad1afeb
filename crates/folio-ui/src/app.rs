//! Browser entrypoint: a content list view hosting the bulk-action toolbar.

use crate::components::atoms::BulkActionBar;
use crate::config::BulkActionConfig;
use crate::core::selection::{EntryId, RowRecord, SelectionSource};
use crate::core::store::{self, ListViewStore};
use crate::error::HandlerError;
use crate::features::bulk_actions::actions::BulkActionKind;
use crate::features::bulk_actions::handler::{BulkActionHandlers, HandlerRef};
use crate::features::bulk_actions::state::Settlement;
use crate::features::bulk_actions::view::BulkActionButtons;
use crate::i18n::{DEFAULT_LOCALE, LocaleCode, TranslationBundle};
use async_trait::async_trait;
use chrono::Utc;
use gloo::console;
use gloo_timers::future::TimeoutFuture;
use std::rc::Rc;
use yew::prelude::*;
use yewdux::prelude::{Dispatch, use_selector};

const HANDLER_LATENCY_MS: u32 = 600;

/// Handlers applying bulk actions to the list-view store after a simulated round trip.
struct StoreHandlers {
    dispatch: Dispatch<ListViewStore>,
}

impl StoreHandlers {
    fn new() -> Self {
        Self {
            dispatch: Dispatch::<ListViewStore>::new(),
        }
    }

    fn locked(&self, ids: &[EntryId]) -> Option<EntryId> {
        let store = self.dispatch.get();
        store
            .rows()
            .iter()
            .filter(|row| ids.contains(&row.id))
            .find(|row| row.fields.get("locked").and_then(serde_json::Value::as_bool) == Some(true))
            .map(|row| row.id)
    }
}

#[async_trait(?Send)]
impl BulkActionHandlers for StoreHandlers {
    async fn publish_all(&self, ids: &[EntryId]) -> Result<(), HandlerError> {
        TimeoutFuture::new(HANDLER_LATENCY_MS).await;
        let ids = ids.to_vec();
        self.dispatch
            .reduce_mut(move |store| store::mark_published(store, &ids, Utc::now()));
        Ok(())
    }

    async fn unpublish_all(&self, ids: &[EntryId]) -> Result<(), HandlerError> {
        TimeoutFuture::new(HANDLER_LATENCY_MS).await;
        let ids = ids.to_vec();
        self.dispatch
            .reduce_mut(move |store| store::mark_unpublished(store, &ids));
        Ok(())
    }

    async fn delete_all(&self, ids: &[EntryId]) -> Result<(), HandlerError> {
        TimeoutFuture::new(HANDLER_LATENCY_MS).await;
        if let Some(id) = self.locked(ids) {
            return Err(HandlerError::new(format!("entry {id} is locked")));
        }
        let ids = ids.to_vec();
        self.dispatch
            .reduce_mut(move |store| store::remove_rows(store, &ids));
        Ok(())
    }
}

fn demo_rows() -> Vec<RowRecord> {
    let published = Utc::now();
    vec![
        RowRecord::draft(1).with_field("title", "Release notes"),
        RowRecord::published(2, published).with_field("title", "About us"),
        RowRecord::draft(3).with_field("title", "Pricing"),
        RowRecord::draft(4)
            .with_field("title", "Legal notice")
            .with_field("locked", true),
        RowRecord::published(5, published).with_field("title", "Careers"),
        RowRecord::draft(6).with_field("title", "Roadmap"),
    ]
}

/// Root component: locale context, list table, and bulk toolbar.
#[function_component(ListViewApp)]
pub fn list_view_app() -> Html {
    let locale = use_state(|| DEFAULT_LOCALE);
    let bundle = {
        let locale = *locale;
        use_memo(move |_| TranslationBundle::new(locale), locale)
    };
    let dispatch = Dispatch::<ListViewStore>::new();
    let selection = use_selector(ListViewStore::snapshot);
    let rows = use_selector(|store: &ListViewStore| store.rows.clone());
    let config = use_memo(
        |_| {
            BulkActionConfig::default()
                .with_publish(true)
                .with_delete(true)
                .with_main_field("title")
        },
        (),
    );
    let handlers = use_memo(|_| HandlerRef::from(Rc::new(StoreHandlers::new())), ());
    let toast = use_state(|| None::<String>);

    {
        let dispatch = dispatch.clone();
        use_effect_with_deps(
            move |_| {
                dispatch.reduce_mut(|store| store::set_rows(store, demo_rows()));
                || ()
            },
            (),
        );
    }

    let on_settled = {
        let toast = toast.clone();
        let bundle = (*bundle).clone();
        Callback::from(move |(kind, settlement): (BulkActionKind, Settlement)| {
            if let Settlement::Failed { error } = settlement {
                console::error!("bulk action failed", kind.as_str(), error.to_string());
                toast.set(Some(bundle.text("toast.failed", "The bulk action failed.")));
            } else {
                toast.set(None);
            }
        })
    };
    let on_toggle_all = {
        let dispatch = dispatch.clone();
        Callback::from(move |_: MouseEvent| dispatch.reduce_mut(store::select_all_or_clear))
    };
    let on_locale = {
        let locale = locale.clone();
        Callback::from(move |_: MouseEvent| {
            let next = LocaleCode::all()
                .into_iter()
                .cycle()
                .skip_while(|code| *code != *locale)
                .nth(1)
                .unwrap_or(DEFAULT_LOCALE);
            locale.set(next);
        })
    };

    html! {
        <ContextProvider<TranslationBundle> context={(*bundle).clone()}>
            <main class="list-view">
                <header class="list-header">
                    <button class="ghost" onclick={on_locale}>{locale.code()}</button>
                </header>
                <BulkActionBar
                    select_label={bundle.text("list.select_all", "Select all")}
                    selected_label={bundle.text("list.selected", "selected")}
                    selected_count={selection.selected_entries().len()}
                    on_toggle_all={on_toggle_all}
                >
                    <BulkActionButtons
                        selection={(*selection).clone()}
                        config={config.clone()}
                        handlers={(*handlers).clone()}
                        on_settled={on_settled}
                    />
                </BulkActionBar>
                if let Some(message) = &*toast {
                    <div class="toast error" role="alert">{message.clone()}</div>
                }
                <table class="list-table">
                    <tbody>
                        if rows.is_empty() {
                            <tr><td colspan="3">{bundle.text("list.empty", "No entries")}</td></tr>
                        }
                        { for rows.iter().map(|row| {
                            let id = row.id;
                            let on_toggle = {
                                let dispatch = dispatch.clone();
                                Callback::from(move |_: Event| {
                                    dispatch.reduce_mut(|store| store::toggle_selected(store, id));
                                })
                            };
                            html! {
                                <tr key={id.to_string()}>
                                    <td>
                                        <input
                                            type="checkbox"
                                            checked={selection.is_selected(id)}
                                            onchange={on_toggle}
                                        />
                                    </td>
                                    <td>{row.field_text("title").unwrap_or_default()}</td>
                                    <td class="muted">
                                        if row.is_published() {
                                            {"published"}
                                        } else {
                                            {"draft"}
                                        }
                                    </td>
                                </tr>
                            }
                        }) }
                    </tbody>
                </table>
            </main>
        </ContextProvider<TranslationBundle>>
    }
}

/// Mount the list view into `#root`, or the document body when it is missing.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<ListViewApp>::with_root(root).render();
    } else {
        yew::Renderer::<ListViewApp>::new().render();
    }
}
