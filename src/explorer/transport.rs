//! Search channel transport.
//!
//! The session machine only sees the [`Connector`] and [`Channel`] traits.
//! Whatever happens on the wire comes back as a [`TransportEvent`] pushed into
//! an [`EventSink`], tagged with the generation of the channel that produced
//! it so the session can drop callbacks from channels it has already replaced.
//!
//! [`WebSocketConnector`] is the browser implementation.

use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};

use crate::error::TransportError;

/// Close code for an orderly shutdown.
pub const NORMAL_CLOSURE: u16 = 1000;

/// Identifies one opened channel. Strictly increasing per session machine.
pub type Generation = u64;

/// Something that happened on a channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportEvent {
	/// The channel is ready to send.
	Opened,
	/// A text frame.
	Message(String),
	/// A frame that was not text.
	Binary,
	/// The channel reported an error. A close usually follows.
	Error,
	/// The channel closed with a WebSocket close code.
	Closed {
		/// WebSocket close code.
		code: u16,
		/// Close reason sent by the peer, often empty.
		reason: String,
	},
}

/// Receives events from every channel opened by a connector.
pub type EventSink = Rc<dyn Fn(Generation, TransportEvent)>;

/// Opens search channels.
pub trait Connector {
	/// Channel type this connector opens.
	type Channel: Channel;

	/// Start connecting. Completion is reported later as
	/// [`TransportEvent::Opened`] for `generation`.
	fn open(&mut self, generation: Generation) -> Result<Self::Channel, TransportError>;
}

/// One open (or opening) duplex channel.
pub trait Channel {
	/// Queue a text frame.
	fn send(&mut self, frame: &str) -> Result<(), TransportError>;

	/// Close the channel and detach its callbacks. No events for this channel
	/// are delivered afterwards.
	fn close(&mut self, code: u16);
}

/// Opens a browser WebSocket per search.
pub struct WebSocketConnector {
	url: String,
	sink: EventSink,
}

impl WebSocketConnector {
	/// Connector for `url` reporting events to `sink`.
	pub fn new(url: impl Into<String>, sink: EventSink) -> Self {
		Self {
			url: url.into(),
			sink,
		}
	}
}

/// Callbacks registered on a socket. Kept alive as long as the channel is.
struct Handlers {
	_on_open: Closure<dyn FnMut(Event)>,
	_on_message: Closure<dyn FnMut(MessageEvent)>,
	_on_error: Closure<dyn FnMut(Event)>,
	_on_close: Closure<dyn FnMut(CloseEvent)>,
}

/// A browser WebSocket tagged with its generation.
pub struct WebSocketChannel {
	socket: WebSocket,
	generation: Generation,
	handlers: Option<Handlers>,
}

impl Connector for WebSocketConnector {
	type Channel = WebSocketChannel;

	fn open(&mut self, generation: Generation) -> Result<WebSocketChannel, TransportError> {
		let socket = WebSocket::new(&self.url)
			.map_err(|e| TransportError::Open(format!("{:?}", e)))?;

		let sink = self.sink.clone();
		let on_open = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
			sink(generation, TransportEvent::Opened);
		});

		let sink = self.sink.clone();
		let on_message = Closure::<dyn FnMut(MessageEvent)>::new(move |ev: MessageEvent| {
			match ev.data().as_string() {
				Some(text) => sink(generation, TransportEvent::Message(text)),
				None => sink(generation, TransportEvent::Binary),
			}
		});

		let sink = self.sink.clone();
		let on_error = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
			sink(generation, TransportEvent::Error);
		});

		let sink = self.sink.clone();
		let on_close = Closure::<dyn FnMut(CloseEvent)>::new(move |ev: CloseEvent| {
			sink(
				generation,
				TransportEvent::Closed {
					code: ev.code(),
					reason: ev.reason(),
				},
			);
		});

		socket.set_onopen(Some(on_open.as_ref().unchecked_ref()));
		socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
		socket.set_onerror(Some(on_error.as_ref().unchecked_ref()));
		socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));
		debug!("pathscope: opening channel {} to {}", generation, self.url);

		Ok(WebSocketChannel {
			socket,
			generation,
			handlers: Some(Handlers {
				_on_open: on_open,
				_on_message: on_message,
				_on_error: on_error,
				_on_close: on_close,
			}),
		})
	}
}

impl WebSocketChannel {
	fn detach(&mut self) {
		self.socket.set_onopen(None);
		self.socket.set_onmessage(None);
		self.socket.set_onerror(None);
		self.socket.set_onclose(None);
		self.handlers = None;
	}
}

impl Channel for WebSocketChannel {
	fn send(&mut self, frame: &str) -> Result<(), TransportError> {
		if self.socket.ready_state() != WebSocket::OPEN {
			return Err(TransportError::NotOpen);
		}
		self.socket
			.send_with_str(frame)
			.map_err(|e| TransportError::Send(format!("{:?}", e)))
	}

	fn close(&mut self, code: u16) {
		if self.handlers.is_none() {
			return;
		}
		self.detach();
		if let Err(e) = self.socket.close_with_code(code) {
			warn!("pathscope: closing channel {} failed: {:?}", self.generation, e);
		}
		debug!("pathscope: closed channel {} with code {}", self.generation, code);
	}
}

impl Drop for WebSocketChannel {
	fn drop(&mut self) {
		self.close(NORMAL_CLOSURE);
	}
}
