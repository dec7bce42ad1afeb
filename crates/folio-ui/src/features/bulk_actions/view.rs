//! Bulk action buttons, confirmation dialog, and publish review modal.
//!
//! # Design
//! - Each control owns its controller; no flow state lives in the shared store.
//! - The selection arrives as a snapshot prop and handlers as an identity-compared reference.
//! - Controls stay mounted while their flow is open even after the button hides.

use crate::components::atoms::Modal;
use crate::config::BulkActionConfig;
use crate::core::schedule::IntervalScheduler;
use crate::core::selection::{EntryId, SelectionSnapshot, SelectionSource};
use crate::features::bulk_actions::actions::{BulkActionKind, selected_count_label};
use crate::features::bulk_actions::controller::BulkActionController;
use crate::features::bulk_actions::dialog::DialogCopy;
use crate::features::bulk_actions::handler::HandlerRef;
use crate::features::bulk_actions::state::{FlowPhase, Settlement};
use crate::features::bulk_actions::visibility::{ActionVisibility, ControlState};
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use gloo::console;
use std::rc::Rc;
use yew::platform::spawn_local;
use yew::prelude::*;

type Controller = BulkActionController<IntervalScheduler>;

/// Kinds whose flow currently shows the confirm spinner.
#[derive(Clone, Debug, Default, PartialEq)]
struct BusyKinds(Vec<BulkActionKind>);

impl Reducible for BusyKinds {
    type Action = (BulkActionKind, bool);

    fn reduce(self: Rc<Self>, (kind, loading): Self::Action) -> Rc<Self> {
        if self.0.contains(&kind) == loading {
            return self;
        }
        let mut kinds = self.0.clone();
        kinds.retain(|busy| *busy != kind);
        if loading {
            kinds.push(kind);
        }
        Rc::new(Self(kinds))
    }
}

/// Props for the bulk action button row.
#[derive(Properties, PartialEq)]
pub(crate) struct BulkActionButtonsProps {
    pub selection: SelectionSnapshot,
    pub config: Rc<BulkActionConfig>,
    pub handlers: HandlerRef,
    #[prop_or_default]
    pub on_settled: Callback<(BulkActionKind, Settlement)>,
}

#[function_component(BulkActionButtons)]
pub(crate) fn bulk_action_buttons(props: &BulkActionButtonsProps) -> Html {
    let busy = use_reducer(BusyKinds::default);
    let visibility = ActionVisibility::evaluate(&props.selection, &props.config, !busy.0.is_empty());
    let on_busy = {
        let busy = busy.clone();
        Callback::from(move |change: (BulkActionKind, bool)| busy.dispatch(change))
    };

    let mut kinds = Vec::new();
    if props.config.show_publish {
        kinds.extend([BulkActionKind::Publish, BulkActionKind::Unpublish]);
    }
    if props.config.show_delete {
        kinds.push(BulkActionKind::Delete);
    }

    html! {
        <>
            { for kinds.into_iter().map(|kind| html! {
                <BulkActionControl
                    key={kind.as_str()}
                    kind={kind}
                    control={visibility.control(kind)}
                    selection={props.selection.clone()}
                    config={props.config.clone()}
                    handlers={props.handlers.clone()}
                    on_busy={on_busy.clone()}
                    on_settled={props.on_settled.clone()}
                />
            }) }
        </>
    }
}

#[derive(Properties, PartialEq)]
struct BulkActionControlProps {
    kind: BulkActionKind,
    control: ControlState,
    selection: SelectionSnapshot,
    config: Rc<BulkActionConfig>,
    handlers: HandlerRef,
    on_busy: Callback<(BulkActionKind, bool)>,
    on_settled: Callback<(BulkActionKind, Settlement)>,
}

#[function_component(BulkActionControl)]
fn bulk_action_control(props: &BulkActionControlProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let refresh = use_force_update();
    let controller: Rc<Controller> = use_memo(
        move |(kind, config)| {
            BulkActionController::new(*kind, config, IntervalScheduler)
                .with_observer(move || refresh.force_update())
        },
        (props.kind, props.config.clone()),
    );
    {
        let controller = controller.clone();
        use_effect_with_deps(
            move |_| move || controller.close(),
            (props.kind, props.config.clone()),
        );
    }

    let loading = controller.flow().is_confirm_loading();
    {
        let on_busy = props.on_busy.clone();
        let kind = props.kind;
        use_effect_with_deps(
            move |loading| {
                on_busy.emit((kind, *loading));
                || ()
            },
            loading,
        );
    }

    let on_open = {
        let controller = controller.clone();
        let selection = props.selection.clone();
        Callback::from(move |_: MouseEvent| {
            if let Err(err) = controller.open(&selection) {
                console::warn!(err.to_string());
            }
        })
    };
    let on_review_confirm = {
        let controller = controller.clone();
        let selection = props.selection.clone();
        Callback::from(move |_: MouseEvent| {
            if let Err(err) = controller.request_confirm(&selection) {
                console::warn!(err.to_string());
            }
        })
    };
    let on_toggle_row = {
        let controller = controller.clone();
        Callback::from(move |id: EntryId| {
            if let Err(err) = controller.toggle_review_selection(id) {
                console::warn!(err.to_string());
            }
        })
    };
    let on_toggle_all = {
        let controller = controller.clone();
        Callback::from(move |()| {
            if let Err(err) = controller.toggle_review_all() {
                console::warn!(err.to_string());
            }
        })
    };
    let on_dismiss = {
        let controller = controller.clone();
        Callback::from(move |()| {
            if let Err(err) = controller.dismiss_confirm() {
                console::warn!(err.to_string());
            }
        })
    };
    let on_close = {
        let controller = controller.clone();
        Callback::from(move |()| controller.close())
    };
    let on_confirm = {
        let controller = controller.clone();
        let selection = props.selection.clone();
        let handlers = props.handlers.clone();
        let on_settled = props.on_settled.clone();
        let kind = props.kind;
        Callback::from(move |_: MouseEvent| {
            let controller = controller.clone();
            let selection = selection.clone();
            let handlers = handlers.clone();
            let on_settled = on_settled.clone();
            spawn_local(async move {
                match controller.confirm(&selection, handlers.0.as_ref()).await {
                    Ok(settlement) => on_settled.emit((kind, settlement)),
                    Err(err) => console::warn!(err.to_string()),
                }
            });
        })
    };

    let kind = props.kind;
    let flow = controller.flow();
    let dialog = flow.dialog();
    let copy = DialogCopy::for_kind(&bundle, kind);

    let button = if props.control.visible {
        html! {
            <button
                class={classes!("ghost", kind.is_destructive().then_some("danger"))}
                disabled={!props.control.enabled}
                onclick={on_open}
            >
                {bundle.text(kind.button_key(), kind.as_str())}
            </button>
        }
    } else {
        html! {}
    };

    let confirm_button = html! {
        <button
            class={classes!("solid", copy.destructive.then_some("danger"))}
            disabled={!dialog.confirm_enabled()}
            aria-busy={dialog.is_confirm_loading.to_string()}
            onclick={on_confirm}
        >
            if dialog.is_confirm_loading {
                <span class="spinner" aria-hidden="true"></span>
            }
            {copy.confirm.clone()}
        </button>
    };
    let confirm_dialog = html! {
        <ConfirmBulkActionDialog
            is_open={dialog.is_open}
            title={copy.title.clone()}
            cancel_label={copy.cancel.clone()}
            on_toggle_dialog={on_dismiss}
            dialog_body={html! { <p>{copy.body.clone()}</p> }}
            end_action={confirm_button}
        />
    };

    if !kind.has_review_modal() {
        return html! { <>{button}{confirm_dialog}</> };
    }
    if !flow.is_open() {
        return button;
    }

    let review = flow.review_selection();
    let checked_count = review.map_or(0, |review| review.selected_entries().len());
    let all_checked = review.is_some_and(|review| {
        !review.rows().is_empty() && review.selected_entries().len() == review.rows().len()
    });
    let rows = flow
        .rendered_rows(&props.selection)
        .into_iter()
        .map(|row| ReviewRow {
            entry: row.record.id,
            main: props
                .config
                .display_main_field()
                .map(|field| row.record.field_text(field).unwrap_or_default()),
            checked: review.is_some_and(|review| review.is_selected(row.record.id)),
            processing: row.processing,
        })
        .collect::<Vec<_>>();

    html! {
        <>
            {button}
            <SelectedEntriesModal
                title={bundle.text("publish_modal.title", "Publish entries")}
                count_label={selected_count_label(&bundle, checked_count)}
                main_field={props.config.display_main_field().map(ToString::to_string)}
                rows={rows}
                all_checked={all_checked}
                locked={flow.phase() != FlowPhase::Reviewing}
                on_toggle_row={on_toggle_row}
                on_toggle_all={on_toggle_all}
                publish_label={bundle.text(kind.button_key(), "Publish")}
                cancel_label={copy.cancel.clone()}
                publish_disabled={checked_count == 0 || loading}
                on_publish={on_review_confirm}
                on_close={on_close}
            >
                {confirm_dialog}
            </SelectedEntriesModal>
        </>
    }
}

/// Props for the confirmation dialog.
#[derive(Properties, PartialEq)]
pub(crate) struct ConfirmBulkActionDialogProps {
    pub is_open: bool,
    pub title: AttrValue,
    pub cancel_label: AttrValue,
    pub on_toggle_dialog: Callback<()>,
    pub dialog_body: Html,
    pub end_action: Html,
}

#[function_component(ConfirmBulkActionDialog)]
pub(crate) fn confirm_bulk_action_dialog(props: &ConfirmBulkActionDialogProps) -> Html {
    let on_cancel = {
        let toggle = props.on_toggle_dialog.clone();
        Callback::from(move |_: MouseEvent| toggle.emit(()))
    };
    html! {
        <Modal
            open={props.is_open}
            labelled_by="bulk-confirm-title"
            class="confirm-dialog"
            on_close={props.on_toggle_dialog.clone()}
        >
            <h3 id="bulk-confirm-title">{props.title.clone()}</h3>
            <div class="confirm-body">{props.dialog_body.clone()}</div>
            <div class="modal-action">
                <button class="ghost" onclick={on_cancel}>{props.cancel_label.clone()}</button>
                {props.end_action.clone()}
            </div>
        </Modal>
    }
}

#[derive(Clone, Debug, PartialEq)]
struct ReviewRow {
    entry: EntryId,
    main: Option<String>,
    checked: bool,
    processing: bool,
}

#[derive(Properties, PartialEq)]
struct SelectedEntriesModalProps {
    title: AttrValue,
    count_label: AttrValue,
    main_field: Option<String>,
    rows: Vec<ReviewRow>,
    all_checked: bool,
    locked: bool,
    on_toggle_row: Callback<EntryId>,
    on_toggle_all: Callback<()>,
    publish_label: AttrValue,
    cancel_label: AttrValue,
    publish_disabled: bool,
    on_publish: Callback<MouseEvent>,
    on_close: Callback<()>,
    #[prop_or_default]
    children: Children,
}

#[function_component(SelectedEntriesModal)]
fn selected_entries_modal(props: &SelectedEntriesModalProps) -> Html {
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let processing = bundle.text("publish_modal.processing", "Loading...");
    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let on_header_check = {
        let toggle = props.on_toggle_all.clone();
        Callback::from(move |_: Event| toggle.emit(()))
    };

    html! {
        <Modal
            open={true}
            labelled_by="publish-modal-title"
            class="publish-modal"
            on_close={props.on_close.clone()}
        >
            <h3 id="publish-modal-title">{props.title.clone()}</h3>
            <p class="muted">{props.count_label.clone()}</p>
            <table class="review-table">
                <thead>
                    <tr>
                        <th>
                            <input
                                type="checkbox"
                                aria-label={bundle.text("list.select_all", "Select all")}
                                checked={props.all_checked}
                                disabled={props.locked}
                                onchange={on_header_check}
                            />
                        </th>
                        <th>{bundle.text("publish_modal.column_id", "id")}</th>
                        if let Some(field) = &props.main_field {
                            <th>{field.clone()}</th>
                        }
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    { for props.rows.iter().map(|row| {
                        let entry = row.entry;
                        let on_check = {
                            let toggle = props.on_toggle_row.clone();
                            Callback::from(move |_: Event| toggle.emit(entry))
                        };
                        html! {
                            <tr key={entry.to_string()}>
                                <td>
                                    <input
                                        type="checkbox"
                                        checked={row.checked}
                                        disabled={props.locked}
                                        onchange={on_check}
                                    />
                                </td>
                                <td>{entry.to_string()}</td>
                                if let Some(main) = &row.main {
                                    <td>{main.clone()}</td>
                                }
                                <td class="status">
                                    if row.processing {
                                        <span class="spinner" aria-hidden="true"></span>
                                        {processing.clone()}
                                    }
                                </td>
                            </tr>
                        }
                    }) }
                </tbody>
            </table>
            <div class="modal-action">
                <button class="ghost" onclick={on_cancel}>{props.cancel_label.clone()}</button>
                <button
                    class="solid"
                    disabled={props.publish_disabled}
                    onclick={props.on_publish.clone()}
                >
                    {props.publish_label.clone()}
                </button>
            </div>
            { for props.children.iter() }
        </Modal>
    }
}
