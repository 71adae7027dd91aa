use crate::shared::icons::icon;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

/// Через сколько уведомление исчезает само, мс
const AUTO_DISMISS_MS: u32 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
}

impl NotificationKind {
    fn modifier(&self) -> &'static str {
        match self {
            NotificationKind::Success => "notification--success",
            NotificationKind::Warning => "notification--warning",
            NotificationKind::Error => "notification--error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
}

/// Очередь уведомлений
#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    items: Vec<Notification>,
    next_id: u64,
}

impl NotificationQueue {
    pub fn push(&mut self, kind: NotificationKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        self.items.push(Notification {
            id: self.next_id,
            kind,
            message: message.into(),
        });
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|n| n.id != id);
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }
}

/// Сервис временных уведомлений (раздаётся через context)
#[derive(Clone, Copy)]
pub struct NotificationService {
    queue: RwSignal<NotificationQueue>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            queue: RwSignal::new(NotificationQueue::default()),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(NotificationKind::Success, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.push(NotificationKind::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(NotificationKind::Error, message);
    }

    pub fn dismiss(&self, id: u64) {
        self.queue.update(|q| q.dismiss(id));
    }

    fn push(&self, kind: NotificationKind, message: impl Into<String>) {
        let mut id = 0;
        self.queue.update(|q| id = q.push(kind, message));

        let service = *self;
        Timeout::new(AUTO_DISMISS_MS, move || service.dismiss(id)).forget();
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

/// Область вывода уведомлений (правый верхний угол)
#[component]
pub fn NotificationHost() -> impl IntoView {
    let service =
        use_context::<NotificationService>().expect("NotificationService not provided in context");

    view! {
        <div class="notification-host">
            <For
                each=move || service.queue.with(|q| q.items().to_vec())
                key=|n: &Notification| n.id
                children=move |n: Notification| {
                    let id = n.id;
                    view! {
                        <div class=format!("notification {}", n.kind.modifier())>
                            <span class="notification__text">{n.message}</span>
                            <button
                                class="button button--icon notification__close"
                                on:click=move |_| service.dismiss(id)
                            >
                                {icon("x")}
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_push_and_dismiss() {
        let mut queue = NotificationQueue::default();
        let first = queue.push(NotificationKind::Error, "Erreur réseau");
        let second = queue.push(NotificationKind::Success, "3 produit(s) supprimé(s)");
        assert_ne!(first, second);
        assert_eq!(queue.items().len(), 2);

        queue.dismiss(first);
        assert_eq!(queue.items().len(), 1);
        assert_eq!(queue.items()[0].kind, NotificationKind::Success);

        // Повторное закрытие не ломает очередь
        queue.dismiss(first);
        assert_eq!(queue.items().len(), 1);
    }
}
