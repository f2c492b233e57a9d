use crate::game::ClientGameState;
use crate::input::{parse_command, UserCommand, HELP};
use crate::rendering::render;
use log::{debug, info, warn};
use shared::{recv_message, send_message, FrameError, Request, Response};
use std::time::Duration;
use tokio::io::{stdin, AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;
use tokio::time::{interval, MissedTickBehavior};

/// One TCP connection to the server, used for sequential request/response
/// exchanges.
pub struct Connection {
    stream: TcpStream,
}

impl Connection {
    pub async fn connect(server_addr: &str) -> Result<Self, FrameError> {
        let stream = TcpStream::connect(server_addr).await?;
        stream.set_nodelay(true)?;
        info!("Connected to {}", server_addr);
        Ok(Connection { stream })
    }

    /// Sends `request` and waits for its response.
    pub async fn request(&mut self, request: &Request) -> Result<Response, FrameError> {
        send_message(&mut self.stream, request).await?;
        recv_message(&mut self.stream)
            .await?
            .ok_or(FrameError::Closed)
    }

    pub async fn join(&mut self, name: &str) -> Result<Response, FrameError> {
        self.request(&Request::Join {
            name: Some(name.to_string()),
        })
        .await
    }

    pub async fn submit_move(
        &mut self,
        token: &str,
        x: i64,
        y: i64,
    ) -> Result<Response, FrameError> {
        self.request(&Request::Move {
            token: Some(token.to_string()),
            x: Some(x),
            y: Some(y),
        })
        .await
    }

    pub async fn state(&mut self) -> Result<Response, FrameError> {
        self.request(&Request::State).await
    }

    pub async fn quit(&mut self, token: &str) -> Result<Response, FrameError> {
        self.request(&Request::Quit {
            token: Some(token.to_string()),
        })
        .await
    }

    pub async fn chat(&mut self, token: &str, text: &str) -> Result<Response, FrameError> {
        self.request(&Request::Chat {
            token: Some(token.to_string()),
            text: Some(text.to_string()),
        })
        .await
    }

    pub async fn restart(&mut self, token: &str) -> Result<Response, FrameError> {
        self.request(&Request::Restart {
            token: Some(token.to_string()),
        })
        .await
    }
}

/// Interactive terminal client: reads commands from stdin, polls the server
/// for state and redraws the board when it changes.
pub struct Client {
    connection: Connection,
    state: ClientGameState,
    poll_interval: Duration,
}

impl Client {
    pub async fn new(
        server_addr: &str,
        name: &str,
        poll_interval: Duration,
    ) -> Result<Self, FrameError> {
        let connection = Connection::connect(server_addr).await?;
        Ok(Client {
            connection,
            state: ClientGameState::new(name),
            poll_interval,
        })
    }

    fn redraw(&self) {
        println!("{}", render(&self.state));
    }

    /// Sends one user command; returns `None` for commands that never reach
    /// the server.
    async fn execute(&mut self, command: UserCommand) -> Result<Option<Response>, FrameError> {
        let Some(token) = self.state.token.clone() else {
            warn!("Not joined; ignoring {:?}", command);
            return Ok(None);
        };

        let response = match command {
            UserCommand::Move { x, y } => self.connection.submit_move(&token, x, y).await?,
            UserCommand::State => self.connection.state().await?,
            UserCommand::Restart => self.connection.restart(&token).await?,
            UserCommand::Chat(text) => self.connection.chat(&token, &text).await?,
            UserCommand::Quit | UserCommand::Help => return Ok(None),
        };
        Ok(Some(response))
    }

    pub async fn run(&mut self) -> Result<(), FrameError> {
        let response = self.connection.join(&self.state.name.clone()).await?;
        self.state.apply(&response);
        self.redraw();
        println!("{}", HELP);

        let mut lines = BufReader::new(stdin()).lines();
        let mut poll = interval(self.poll_interval);
        poll.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        debug!("stdin closed");
                        break;
                    };

                    match parse_command(&line) {
                        Ok(UserCommand::Quit) => break,
                        Ok(UserCommand::Help) => println!("{}", HELP),
                        Ok(command) => {
                            if let Some(response) = self.execute(command).await? {
                                self.state.apply(&response);
                                self.redraw();
                            }
                        }
                        Err(e) => println!("{}", e),
                    }
                },

                _ = poll.tick() => {
                    let response = self.connection.state().await?;
                    if self.state.apply(&response) {
                        self.redraw();
                    }
                },
            }
        }

        if let Some(token) = self.state.token.clone() {
            let response = self.connection.quit(&token).await?;
            self.state.apply(&response);
            info!("Left the game");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    /// Accepts one connection, answers the first request with `reply`, then
    /// closes the socket.
    async fn one_shot_server(reply: Response) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request: Option<Request> = recv_message(&mut stream).await.unwrap();
            assert!(request.is_some());
            send_message(&mut stream, &reply).await.unwrap();
        });
        addr.to_string()
    }

    #[tokio::test]
    async fn test_request_returns_server_reply() {
        let addr = one_shot_server(Response::Bye).await;
        let mut connection = Connection::connect(&addr).await.unwrap();

        let response = connection.quit("abc").await.unwrap();
        assert_eq!(response, Response::Bye);
    }

    #[tokio::test]
    async fn test_closed_connection_is_reported() {
        let addr = one_shot_server(Response::Bye).await;
        let mut connection = Connection::connect(&addr).await.unwrap();
        connection.state().await.unwrap();

        let result = connection.state().await;
        assert!(matches!(
            result,
            Err(FrameError::Closed) | Err(FrameError::Io(_))
        ));
    }
}
