pub mod article_list;
pub mod article_page;
pub mod block_editor;
pub mod content_block;
pub mod editor_panel;
pub mod error_screen;
pub mod event_details;
pub mod event_fields_editor;
pub mod figure;
pub mod generic_layout;
pub mod new_article_form;
pub mod paragraph;
pub mod section_heading;

pub use article_list::ArticleList;
pub use article_page::ArticlePage;
pub use block_editor::BlockEditor;
pub use content_block::ContentBlock;
pub use editor_panel::EditorPanel;
pub use error_screen::ErrorScreen;
pub use event_details::EventDetails;
pub use event_fields_editor::EventFieldsEditor;
pub use figure::Figure;
pub use generic_layout::GenericLayoutView;
pub use new_article_form::NewArticleForm;
pub use paragraph::Paragraph;
pub use section_heading::SectionHeading;
